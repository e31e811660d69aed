//! Independent images packed in parallel give the same bytes as packed in
//! sequence, and one failure does not affect the rest of the batch.

use enough::Unstoppable;
use rayon::prelude::*;
use rgb::RGBA8;
use zenpack::*;

fn gradient(w: u32, h: u32, shift: u8) -> Frames {
    let pixels = (0..w * h)
        .map(|i| {
            let v = (i as u8).wrapping_mul(17).wrapping_add(shift);
            RGBA8::new(v, v.wrapping_add(85), v.wrapping_add(170), v)
        })
        .collect();
    Frames::single(w, h, pixels).unwrap()
}

fn jobs() -> Vec<(EncodeRequest<'static>, Frames)> {
    (0..64u32)
        .map(|i| {
            let format = PixelFormat::ALL[i as usize % 4];
            let transparency = if format == PixelFormat::Binary {
                Transparency::ChromaKey
            } else {
                Transparency::ALL[i as usize % 3]
            };
            let req = EncodeRequest::new(format).with_transparency(transparency);
            (req, gradient(3 + i % 11, 1 + i % 5, i as u8))
        })
        .collect()
}

#[test]
fn parallel_matches_sequential() {
    let jobs = jobs();
    let sequential: Vec<_> = jobs
        .iter()
        .map(|(req, src)| req.encode(src, Unstoppable).unwrap())
        .collect();
    let parallel: Vec<_> = jobs
        .par_iter()
        .map(|(req, src)| req.encode(src, Unstoppable).unwrap())
        .collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn failure_is_isolated() {
    let mut jobs = jobs();
    jobs[5].0 = EncodeRequest::binary().with_transparency(Transparency::AlphaChannel);
    let results: Vec<_> = jobs
        .par_iter()
        .map(|(req, src)| req.encode(src, Unstoppable))
        .collect();
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.is_err(), i == 5, "job {i}");
    }
}
