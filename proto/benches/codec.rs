#[macro_use]
extern crate criterion;
extern crate xtrace_proto;

use criterion::Criterion;

use xtrace_proto::profiler::*;
use xtrace_wire::prelude::*;

/// A trace in the shape profilers actually emit: a handful of planes, a line
/// per thread, interned event and stat names.
fn synthetic_space(planes: usize, lines: usize, events: usize) -> XSpace {
    let mut sp = space();
    for p in 0..planes {
        let mut pl = plane().id(p as i64).name(format!("/device:GPU:{p}"));
        for m in 0..16i64 {
            pl = pl.event_meta(event_metadata().id(m).name(format!("kernel_{m}")));
        }
        pl = pl.stat_meta(stat_metadata().id(1).name("bytes"));
        for l in 0..lines {
            let mut line = line().id(l as i64).name(format!("stream {l}")).timestamp_ns(1 << 40);
            for e in 0..events {
                line = line.event(
                    event()
                        .metadata_id((e % 16) as i64)
                        .at(1_000 * e as i64)
                        .duration_ps(900)
                        .stat(stat().metadata_id(1).uint64(4096)),
                );
            }
            pl = pl.line(line);
        }
        sp = sp.plane(pl);
    }
    sp
}

fn encode(c: &mut Criterion) {
    let space = synthetic_space(4, 8, 256);
    let len = space.encoded_len();
    c.bench_function(&format!("encode_{len}_bytes"), move |b| {
        b.iter(|| space.encode_to_vec())
    });
}

fn decode(c: &mut Criterion) {
    let bytes = synthetic_space(4, 8, 256).encode_to_vec();
    c.bench_function(&format!("decode_{}_bytes", bytes.len()), move |b| {
        b.iter(|| XSpace::decode(&*bytes).unwrap())
    });
}

fn encoded_len(c: &mut Criterion) {
    let space = synthetic_space(4, 8, 256);
    c.bench_function("encoded_len", move |b| b.iter(|| space.encoded_len()));
}

fn bs(c: &mut Criterion) {
    encode(c);
    decode(c);
    encoded_len(c);
}

criterion_group!(benches, bs);
criterion_main!(benches);
