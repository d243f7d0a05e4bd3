use criterion::{Criterion, black_box, criterion_group, criterion_main};
use redirect_me::{
    redirect::{RequestContext, decide, marker::MarkerConfig},
    settings::types::RawSettings,
};
use time::macros::datetime;

fn bench_decide(c: &mut Criterion) {
    let settings = RawSettings::from_pairs([
        ("redirect_url", "https://example.com/landing"),
        ("timeout_value", "30"),
        ("timeout_unit", "minutes"),
    ])
    .normalize();
    let visitor = RequestContext::default();
    let marked = RequestContext {
        marker: Some("1".to_string()),
        ..Default::default()
    };

    let mut group = c.benchmark_group("Redirect decision");
    group.bench_function("first visit", |b| {
        b.iter(|| decide(black_box(&visitor), black_box(&settings)))
    });
    group.bench_function("marked visit", |b| {
        b.iter(|| decide(black_box(&marked), black_box(&settings)))
    });
    group.bench_function("issue marker", |b| {
        let marker = MarkerConfig::default();
        let now = datetime!(2026-10-18 12:00 UTC);
        b.iter(|| marker.issue(black_box(1800), now))
    });
    group.finish();
}

criterion_group!(benches, bench_decide);
criterion_main!(benches);
