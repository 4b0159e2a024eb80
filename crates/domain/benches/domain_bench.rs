use common::DefaultClock;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{AggregateRoot, Email, SnapshotCapable, TodoItem, User};
use std::hint::black_box;

fn bench_email_create(c: &mut Criterion) {
    c.bench_function("domain/email_create", |b| {
        b.iter(|| Email::create(black_box("  John.Doe@Example.COM ")).unwrap());
    });
}

fn bench_user_create(c: &mut Criterion) {
    let clock = DefaultClock;

    c.bench_function("domain/user_create", |b| {
        b.iter(|| {
            User::create(black_box("ann@example.com"), black_box("Ann Smith"), &clock).unwrap()
        });
    });
}

fn bench_user_lifecycle(c: &mut Criterion) {
    let clock = DefaultClock;

    c.bench_function("domain/user_lifecycle", |b| {
        b.iter(|| {
            let mut user = User::create("ann@example.com", "Ann Smith", &clock).unwrap();
            user.change_email("ann@work.com", &clock).unwrap();
            user.deactivate("on leave", &clock).unwrap();
            user.activate(&clock).unwrap();
            user.take_domain_events()
        });
    });
}

fn bench_snapshot_roundtrip(c: &mut Criterion) {
    let clock = DefaultClock;
    let mut item = TodoItem::create("Buy milk", &clock).unwrap();
    item.mark_completed(&clock);

    c.bench_function("domain/todo_snapshot_roundtrip", |b| {
        b.iter(|| {
            let json = serde_json::to_value(item.snapshot()).unwrap();
            TodoItem::restore(serde_json::from_value(json).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_email_create,
    bench_user_create,
    bench_user_lifecycle,
    bench_snapshot_roundtrip
);
criterion_main!(benches);
