#[macro_use]
extern crate criterion;
extern crate xtrace_wire;

use criterion::Criterion;
use xtrace_wire::{decode_varint, encode_varint, varint_len};

fn values(bits: u32, n: usize) -> Vec<u64> {
    (0..n as u64).map(|i| (i.wrapping_mul(0x9e3779b97f4a7c15)) >> (64 - bits)).collect()
}

fn encode(c: &mut Criterion, bits: u32) {
    c.bench_function(&format!("encode_{bits}_bits"), move |be| {
        let values = values(bits, 1024);
        let mut buf = Vec::with_capacity(10 * values.len());
        be.iter(|| {
            buf.clear();
            for &v in &values {
                encode_varint(v, &mut buf);
            }
        });
    });
}

fn decode(c: &mut Criterion, bits: u32) {
    c.bench_function(&format!("decode_{bits}_bits"), move |be| {
        let values = values(bits, 1024);
        let mut buf = Vec::with_capacity(10 * values.len());
        for &v in &values {
            encode_varint(v, &mut buf);
        }
        be.iter(|| {
            let mut slice = &buf[..];
            let mut sum = 0u64;
            while !slice.is_empty() {
                sum = sum.wrapping_add(decode_varint(&mut slice).unwrap());
            }
            sum
        });
    });
}

fn len(c: &mut Criterion) {
    c.bench_function("varint_len", move |be| {
        let values = values(64, 1024);
        be.iter(|| values.iter().map(|&v| varint_len(v)).sum::<usize>());
    });
}

fn bs(c: &mut Criterion) {
    for bits in [7, 21, 35, 64] {
        encode(c, bits);
        decode(c, bits);
    }
    len(c);
}

criterion_group!(benches, bs);
criterion_main!(benches);
