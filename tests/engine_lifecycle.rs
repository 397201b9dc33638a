//! End-to-end engine behavior as a renderer drives it.

use std::io::Write;

use lorenz_trace::prelude::*;
use lorenz_trace::trace::COMPONENTS;

fn engine(traces: usize, capacity: usize) -> SimulationEngine {
    let config = EngineConfig::builder()
        .seed(42)
        .num_traces(traces)
        .trace_capacity(capacity)
        .build();
    SimulationEngine::new(config).unwrap()
}

#[test]
fn test_reference_euler_step() {
    let field = LorenzSystem::default();
    let mut t = Trajectory::new(State::new(1.0, 1.0, 1.0), 4).unwrap();

    t.advance(&EulerIntegrator::new(), &field, 0.01);

    let p = t.position();
    assert!((p.x - 1.0).abs() < 1e-12);
    assert!((p.y - 1.26).abs() < 1e-12);
    assert!((p.z - (1.0 - 0.05 / 3.0)).abs() < 1e-12);

    let stored = t.buffer().latest().unwrap();
    assert!((f64::from(stored[1]) - 1.26).abs() < 1e-6);
}

#[test]
fn test_ring_buffer_wraps_and_window_follows_head() {
    let mut engine = engine(2, 64);
    for _ in 0..100 {
        engine.advance_frame();
    }

    for t in engine.trajectories() {
        let buffer = t.buffer();
        assert!(buffer.is_full());
        assert_eq!(buffer.written(), 64);
        assert_eq!(buffer.head(), 100 % 64);
        assert_eq!(buffer.total_appended(), 100);
        assert_eq!(buffer.as_flat().len(), 64 * COMPONENTS);
    }

    let window = engine.visible_window(0).unwrap();
    assert_eq!(window.start, 0);
    assert_eq!(window.count, 36);
}

#[test]
fn test_max_visible_limits_window() {
    let config = EngineConfig::builder()
        .seed(1)
        .num_traces(1)
        .trace_capacity(100)
        .max_visible(10)
        .build();
    let mut engine = SimulationEngine::new(config).unwrap();
    for _ in 0..25 {
        engine.advance_frame();
    }

    let window = engine.visible_window(0).unwrap();
    assert_eq!(window.start, 15);
    assert_eq!(window.count, 10);

    let t = engine.trajectory(0).unwrap();
    let slice = t.buffer().window_slice(&window);
    assert_eq!(slice.len(), 10 * COMPONENTS);
    let latest = t.buffer().latest().unwrap();
    assert_eq!(&slice[slice.len() - COMPONENTS..], &latest[..]);
}

#[test]
fn test_pause_is_idempotent_and_freezes_state() {
    let mut engine = engine(3, 32);
    engine.advance_frame();

    engine.set_paused(true);
    engine.set_paused(true);
    let frozen = engine.positions();
    for _ in 0..10 {
        let report = engine.advance_frame();
        assert_eq!(report.steps, 0);
    }
    assert_eq!(engine.positions(), frozen);
    assert_eq!(engine.clock().frames(), 1);

    assert_eq!(engine.toggle_paused(), RunState::Running);
    engine.advance_frame();
    assert_ne!(engine.positions(), frozen);
}

#[test]
fn test_set_trace_count_gives_fresh_empty_traces() {
    let mut engine = engine(10, 32);
    for _ in 0..5 {
        engine.advance_frame();
    }

    engine.set_trace_count(5).unwrap();

    assert_eq!(engine.num_traces(), 5);
    for i in 0..5 {
        assert!(engine.visible_window(i).unwrap().is_empty());
    }
    assert!(engine.visible_window(5).is_none());
    assert!(engine.set_trace_count(0).is_err());
    assert_eq!(engine.num_traces(), 5);
}

#[test]
fn test_clear_keeps_count_and_restarts_history() {
    let mut engine = engine(4, 32);
    for _ in 0..10 {
        engine.advance_frame();
    }

    engine.clear_traces();

    assert_eq!(engine.num_traces(), 4);
    for t in engine.trajectories() {
        assert!(t.buffer().is_empty());
        assert_eq!(t.position(), t.start());
    }
}

#[test]
fn test_parameter_changes_apply_from_next_frame() {
    let mut engine = engine(1, 32);
    engine
        .update_parameters(&ParameterPatch::new().rho(99.0).steps_per_frame(3))
        .unwrap();

    let report = engine.advance_frame();
    assert_eq!(report.steps, 3);
    assert_eq!(engine.parameters().rho, 99.0);

    engine.reset_parameters();
    assert_eq!(engine.parameters().rho, engine.default_parameters().rho);
}

#[test]
fn test_runaway_parameters_propagate_without_clamping() {
    let mut engine = engine(2, 16);
    engine
        .update_parameters(&ParameterPatch::new().dt(10.0))
        .unwrap();

    let mut reported = Vec::new();
    for _ in 0..200 {
        reported.extend(engine.advance_frame().newly_diverged);
    }

    assert_eq!(engine.diverged_traces(), vec![0, 1]);
    reported.sort_unstable();
    assert_eq!(reported, vec![0, 1]);
    assert!(engine.positions().iter().all(|p| !p.is_finite()));
}

#[test]
fn test_engine_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br"
parameters:
  sigma: 10.0
  rho: 28.0
  dt: 0.01
  steps_per_frame: 4
num_traces: 3
trace_capacity: 500
max_visible: 200
integrator: rk4
seed: 2024
seeding:
  anchor_extent: 5.0
  jitter: 0.001
",
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    let mut engine = SimulationEngine::new(config).unwrap();

    assert_eq!(engine.num_traces(), 3);
    assert_eq!(engine.max_visible(), 200);
    assert_eq!(engine.integrator_kind(), IntegratorKind::Rk4);
    assert_eq!(engine.seed(), 2024);
    for t in engine.trajectories() {
        let s = t.start();
        assert!(s.x < 5.0 + 0.001 && s.y < 5.0 + 0.001 && s.z < 5.0 + 0.001);
    }

    engine.advance_frame();
    assert_eq!(engine.clock().steps(), 4);
}

#[test]
fn test_unknown_yaml_field_rejected() {
    let err = EngineConfig::from_yaml("num_traces: 2\nwarp_speed: 9\n").unwrap_err();
    assert!(err.is_config_error());
}
