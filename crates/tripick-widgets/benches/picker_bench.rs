//! Benchmarks for the picker reducer, keyboard routing, and view building.
//!
//! Run with: cargo bench -p tripick-widgets

use std::hint::black_box;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tripick_core::event::{KeyCode, KeyEvent};
use tripick_widgets::date_picker::{
    Bounds, DateTimePicker, Mode, MonthGrid, PickerAction, PickerContext, PickerOptions,
    PickerState, PickerValue, PickerView, YearMonth, reduce,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn context() -> PickerContext {
    PickerContext {
        bounds: Bounds::new(Some(ymd(2025, 1, 1)), Some(ymd(2026, 12, 31))).unwrap_or_default(),
        committed: Some(PickerValue::at(ymd(2025, 6, 7), 9, 10)),
        ..PickerContext::new(Mode::DateTime, ymd(2025, 6, 1))
    }
}

// ============================================================================
// Reducer
// ============================================================================

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("picker/reduce");
    let ctx = context();
    let open = reduce(&ctx, &PickerState::seeded(&ctx), &PickerAction::Open);

    let actions = [
        ("focus_date", PickerAction::FocusDate(ymd(2025, 9, 1))),
        ("select_date", PickerAction::SelectDate(ymd(2025, 6, 10))),
        ("select_hour", PickerAction::SelectHour(14)),
        ("cancel", PickerAction::Cancel),
    ];
    for (name, action) in actions {
        group.bench_with_input(BenchmarkId::from_parameter(name), &action, |b, action| {
            b.iter(|| black_box(reduce(&ctx, black_box(&open), action)));
        });
    }
    group.finish();
}

// ============================================================================
// Keyboard sweep
// ============================================================================

fn bench_key_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("picker/keys");
    let keys: Vec<KeyEvent> = [
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::PageDown,
        KeyCode::Tab,
        KeyCode::Char('1'),
        KeyCode::Char('5'),
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Enter,
        KeyCode::BackTab,
        KeyCode::BackTab,
    ]
    .into_iter()
    .map(KeyEvent::new)
    .collect();

    for rounds in [1usize, 10, 100] {
        group.bench_with_input(BenchmarkId::new("sweep", rounds), &rounds, |b, &rounds| {
            b.iter(|| {
                let mut picker = DateTimePicker::new(PickerOptions::new(Mode::DateTime, ymd(2025, 6, 1)));
                let t0 = Instant::now();
                picker.handle_key(&KeyCode::Enter.into(), t0);
                let mut step = 0u64;
                for _ in 0..rounds {
                    for key in &keys {
                        step += 1;
                        picker.handle_key(key, t0 + Duration::from_millis(step * 50));
                    }
                }
                black_box(picker.state());
            });
        });
    }
    group.finish();
}

// ============================================================================
// View
// ============================================================================

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("picker/view");

    group.bench_function("month_grid_weeks", |b| {
        let ym = YearMonth::of(ymd(2025, 6, 1));
        b.iter(|| black_box(MonthGrid::build(black_box(ym)).weeks()));
    });

    let ctx = context();
    let state = reduce(&ctx, &PickerState::seeded(&ctx), &PickerAction::Open);
    group.bench_function("picker_view_build", |b| {
        b.iter(|| black_box(PickerView::build(&ctx, black_box(&state), Some("Hour 9"))));
    });

    group.finish();
}

criterion_group!(benches, bench_reduce, bench_key_sweep, bench_view);
criterion_main!(benches);
