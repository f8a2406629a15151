use criterion::{criterion_group, criterion_main, Criterion};
use gwm_match::{waveform_match, AdvancedLigoAnalyticPsd};
use gwm_wave::synthetic::NEWTONIAN_CHIRP;
use gwm_wave::{Mode, SyntheticModel, Waveform};
use serde_json::{json, Value};

fn chirp(mass1: f64, mass2: f64) -> Waveform {
    let Value::Object(params) = json!({
        "mass1": mass1,
        "mass2": mass2,
        "delta_t": 1.0 / 4096.0,
        "f_lower": 20.0,
        "distance": 100.0,
    }) else {
        unreachable!("object literal");
    };
    Waveform::from_model(&SyntheticModel, NEWTONIAN_CHIRP, &[Mode::DOMINANT], &params)
        .expect("chirp")
}

fn bench_match(c: &mut Criterion) {
    let a = chirp(30.0, 20.0);
    let b = chirp(31.0, 20.0);
    c.bench_function("match_throughput", |bench| {
        bench.iter(|| {
            waveform_match(&a, &b, None, &AdvancedLigoAnalyticPsd).expect("match")
        });
    });
}

criterion_group!(benches, bench_match);
criterion_main!(benches);
