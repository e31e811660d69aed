#![no_main]
use libfuzzer_sys::fuzz_target;
use rgb::RGBA8;
use zenpack::*;

fuzz_target!(|data: &[u8]| {
    // Header: format, transparency, flags, width, height, frames; rest is pixels.
    let [fmt, tr, flags, w, h, frames, rest @ ..] = data else {
        return;
    };
    let format = PixelFormat::ALL[*fmt as usize % 4];
    let transparency = Transparency::ALL[*tr as usize % 3];
    let (w, h, frames) = (u32::from(*w % 33), u32::from(*h % 9), u32::from(*frames % 4));

    let mut req = EncodeRequest::new(format)
        .with_transparency(transparency)
        .with_invert_alpha(flags & 1 != 0);
    if flags & 2 != 0 {
        req = req.with_byte_order(ByteOrder::LittleEndian);
    }
    if flags & 4 != 0 {
        req = req.with_dither(Dither::FloydSteinberg);
    }

    let pixels: Vec<RGBA8> = rest
        .chunks_exact(4)
        .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
        .collect();
    let per_frame = (w * h) as usize;
    let mut source = Frames::new(w, h);
    for f in 0..frames as usize {
        let frame: Vec<RGBA8> = (0..per_frame)
            .map(|i| pixels.get(f * per_frame + i).copied().unwrap_or_default())
            .collect();
        let _ = source.push(frame);
    }

    // Must never panic; on success the size must match the sizer exactly.
    match req.encode(&source, enough::Unstoppable) {
        Ok(img) => {
            let expected = req.buffer_size(w, h, frames).unwrap();
            assert_eq!(img.data().len(), expected);
        }
        Err(e) => assert!(!matches!(e, EncodeError::SizeMismatch { .. })),
    }
});
