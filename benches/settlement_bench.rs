use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use settlement_feasibility_engine::request::InstrumentType;
use settlement_feasibility_engine::{EngineContext, SettlementCheckRequest};

fn benchmark_is_trading_day(c: &mut Criterion) {
    let ctx = EngineContext::with_default_markets();
    let date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();

    c.bench_function("is_trading_day", |b| {
        b.iter(|| ctx.calendar().is_trading_day(black_box("JP"), black_box(date)));
    });
}

fn benchmark_check_settlement(c: &mut Criterion) {
    let ctx = EngineContext::with_default_markets();
    let request = SettlementCheckRequest {
        trade_date: NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
        buy_market: "HK".to_string(),
        sell_market: "JP".to_string(),
        instrument_type: InstrumentType::Equity,
        execution_time: None,
    };

    c.bench_function("check_settlement", |b| {
        b.iter(|| ctx.engine().check_settlement(black_box(&request)));
    });
}

criterion_group!(benches, benchmark_is_trading_day, benchmark_check_settlement);
criterion_main!(benches);
