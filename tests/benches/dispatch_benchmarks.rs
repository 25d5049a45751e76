//! # Ambassador Rewards Benchmarks
//!
//! | Path | Measured |
//! |------|----------|
//! | Dispatcher | route selection and handler evaluation, no store |
//! | Service | full process() including store read, invariant check, commit |
//! | Persistence | snapshot flatten and rebuild |

use ambassador_rewards::domain::registry::REFERENCE_MEMBERS;
use ambassador_rewards::handlers::{dispatch, route_for, HandlerInput};
use ambassador_rewards::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

const T0: u64 = 1_700_000_000;
const PAY_DATE: u64 = T0 + 2_419_200;

fn ready_service() -> RewardProgramService<InMemoryStateStore> {
    let svc = RewardProgramService::new(
        InMemoryStateStore::new(),
        ProgramConfig::default(),
        ServiceConfig::default(),
    );
    let owner = Address::new([0xAA; 32]);
    let args = (0..5).map(Bytes::from_u64).collect();
    svc.process(&Transaction::create(owner, args), &LedgerContext::at(T0))
        .unwrap();
    for m in REFERENCE_MEMBERS {
        svc.process(
            &Transaction::call(m, ProgramId(1), OnCompletion::OptIn),
            &LedgerContext::at(T0 + 1),
        )
        .unwrap();
    }
    svc.process(
        &Transaction::call(REFERENCE_MEMBERS[0], ProgramId(1), OnCompletion::CloseOut),
        &LedgerContext::at(T0 + 2),
    )
    .unwrap();
    svc
}

fn bench_dispatcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatcher");
    group.measurement_time(Duration::from_secs(5));

    let svc = ready_service();
    let config = ProgramConfig::default();
    let global = svc.store().global().unwrap();
    let local = svc.store().local(&REFERENCE_MEMBERS[0]).unwrap();
    let claim = Transaction::claim(REFERENCE_MEMBERS[0], ProgramId(1), 5_000);
    let ctx = LedgerContext::at(PAY_DATE);

    group.bench_function("route_for_claim", |b| {
        b.iter(|| black_box(route_for(black_box(&claim))))
    });

    group.bench_function("dispatch_claim", |b| {
        b.iter(|| {
            let input = HandlerInput {
                tx: &claim,
                ctx: &ctx,
                config: &config,
                program: ProgramId(1),
                global: global.as_ref(),
                local: local.as_ref(),
            };
            black_box(dispatch(&input))
        })
    });

    group.finish();
}

fn bench_service(c: &mut Criterion) {
    let mut group = c.benchmark_group("service");
    group.measurement_time(Duration::from_secs(5));

    let svc = ready_service();
    let outsider = Transaction::claim(Address::new([0x5A; 32]), ProgramId(1), 5_000);
    let ctx = LedgerContext::at(PAY_DATE);

    group.bench_function("process_rejected_claim", |b| {
        b.iter(|| black_box(svc.process(&outsider, &ctx).unwrap()))
    });

    group.finish();
}

fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");

    let snapshot = ready_service().snapshot().unwrap();
    let kv = snapshot.to_kv();

    group.bench_function("to_kv", |b| b.iter(|| black_box(snapshot.to_kv())));
    group.bench_function("from_kv", |b| {
        b.iter(|| black_box(StateSnapshot::from_kv(&kv).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_dispatcher, bench_service, bench_persistence);
criterion_main!(benches);
