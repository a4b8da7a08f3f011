#![feature(test)]
extern crate test;
use draftgeom::Polynomial;
use test::Bencher;

#[bench]
fn bench_quartic(bb: &mut Bencher) {
    let (x1, x2, x3, x4) = (1.0, 2.0, 3.0, 4.0);
    let a = -(x1 + x2 + x3 + x4);
    let b = x1 * (x2 + x3) + x2 * (x3 + x4) + x4 * (x1 + x3);
    let c = -x1 * x2 * (x3 + x4) - x3 * x4 * (x1 + x2);
    let d = x1 * x2 * x3 * x4;
    let poly = Polynomial::from_highest_first(&[1.0, a, b, c, d]);

    bb.iter(|| test::black_box(&poly).roots())
}

#[bench]
fn bench_cubic_in_interval(bb: &mut Bencher) {
    let poly = Polynomial::from_highest_first(&[1.0, -6.0, 11.0, -6.0]);

    bb.iter(|| test::black_box(&poly).roots_in_interval(0.0, 2.5))
}
