use std::f64::consts::PI;

use plotter_rs::{quantize, AffineQuantParams, Plotter};
use shared::{
    plotter_hal::{
        PlotterConfig, PlotterDataPoint, PlotterError, PlotterState, Rgb565,
        SUPPORTED_SCHEMA_VERSION,
    },
    plotter_mock::{ApproximatorMock, DisplayMock},
    DataPointLogger, PagedDataLogger,
};

#[derive(Default)]
struct RecordingLogger {
    enabled: bool,
    data_points: Vec<PlotterDataPoint>,
}

impl DataPointLogger<PlotterDataPoint> for RecordingLogger {
    fn log_data_point(&mut self, data_point: &PlotterDataPoint) {
        if self.enabled {
            self.data_points.push(data_point.clone());
        }
    }

    fn get_bytes_logged(&self) -> u32 {
        0
    }

    fn set_logging_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

fn fixture_logger() -> RecordingLogger {
    RecordingLogger {
        enabled: true,
        data_points: Vec::new(),
    }
}

fn mock_display<'a>(plotter: &'a mut Plotter) -> &'a mut DisplayMock {
    plotter
        .display
        .as_mut_any()
        .downcast_mut::<DisplayMock>()
        .unwrap()
}

fn mock_approximator<'a>(plotter: &'a mut Plotter) -> &'a mut ApproximatorMock {
    plotter
        .approximator
        .as_mut_any()
        .downcast_mut::<ApproximatorMock>()
        .unwrap()
}

fn assert_halted_forever(
    mut approximator: ApproximatorMock,
    expected_fault: PlotterError,
) {
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let mut plotter = Plotter::new(
        PlotterConfig::default(),
        &mut approximator,
        &mut display,
        &mut logger,
    );

    assert_eq!(plotter.state(), PlotterState::Halted);
    assert_eq!(plotter.fault(), Some(expected_fault));

    for _ in 0..100 {
        plotter.update(0.01);
    }

    assert_eq!(plotter.state(), PlotterState::Halted);
    assert_eq!(plotter.inference_count(), 0);
    assert_eq!(plotter.last_point(), None);
    drop(plotter);

    assert_eq!(approximator.invocations, 0);
    assert_eq!(display.circles_drawn, 0);
    assert_eq!(display.clears, 0);

    // Reported exactly once
    assert_eq!(
        logger.data_points,
        vec![PlotterDataPoint::Fault(expected_fault)]
    );
}

#[test]
fn model_version_mismatch_never_starts() {
    let mut approximator = ApproximatorMock::new();
    approximator.schema_version = SUPPORTED_SCHEMA_VERSION - 1;

    assert_halted_forever(
        approximator,
        PlotterError::ModelVersionMismatch {
            model_version: SUPPORTED_SCHEMA_VERSION - 1,
            supported_version: SUPPORTED_SCHEMA_VERSION,
        },
    );
}

#[test]
fn tensor_allocation_failure_never_starts() {
    let mut approximator = ApproximatorMock::new();
    approximator.allocation_succeeds = false;

    assert_halted_forever(approximator, PlotterError::TensorAllocationFailure);
}

#[test]
fn zero_scale_fails_at_startup() {
    let mut approximator = ApproximatorMock::new();
    approximator.output_quantization.scale = 0.0;

    assert_halted_forever(approximator, PlotterError::InvalidQuantizationScale);
}

#[test]
fn display_too_small_fails_at_startup() {
    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::with_size(20, 240);
    let mut logger = fixture_logger();

    let plotter = Plotter::new(
        PlotterConfig::default(),
        &mut approximator,
        &mut display,
        &mut logger,
    );

    assert_eq!(plotter.fault(), Some(PlotterError::DisplayTooSmall));
}

#[test]
fn plots_one_sample_per_update() {
    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let mut plotter = Plotter::new(
        PlotterConfig::default(),
        &mut approximator,
        &mut display,
        &mut logger,
    );

    assert_eq!(plotter.state(), PlotterState::Plotting);

    plotter.update(0.01);

    assert_eq!(plotter.inference_count(), 1);
    assert_eq!(plotter.failed_inferences(), 0);

    let point = plotter.last_point().unwrap();
    assert_eq!(point.x, 0.0);
    assert_eq!(point.y, 0.0);

    let display = mock_display(&mut plotter);
    let circle = display.last_circle.unwrap();
    assert_eq!((circle.x, circle.y), (10, 120));
    assert_eq!(circle.radius, 10);
    assert_eq!(circle.color, Rgb565::YELLOW);
    assert_eq!(display.last_clear_color, Some(Rgb565::BLACK));
    drop(plotter);

    assert_eq!(
        logger.data_points,
        vec![PlotterDataPoint::Sample {
            x: 0.0,
            y: 0.0,
            x_quantized: -128,
            y_quantized: 4,
        }]
    );
}

#[test]
fn half_cycle_feeds_quantized_pi() {
    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let mut plotter = Plotter::new(
        PlotterConfig::default(),
        &mut approximator,
        &mut display,
        &mut logger,
    );

    for _ in 0..501 {
        plotter.update(0.01);
    }

    let input_params = AffineQuantParams::new(0.0245_f32 as f64, -128).unwrap();
    assert_eq!(quantize(PI, &input_params), 0);
    assert_eq!(mock_approximator(&mut plotter).last_input, Some(0));

    let point = plotter.last_point().unwrap();
    assert!((point.x - PI).abs() < 1e-6);
    // 128 * 0.0245 = 3.136, so sin is slightly positive
    assert!(point.y.abs() < 0.02, "{}", point.y);
}

#[test]
fn full_cycle_stays_on_screen() {
    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let mut plotter = Plotter::new(
        PlotterConfig::default(),
        &mut approximator,
        &mut display,
        &mut logger,
    );

    let inferences_per_cycle = plotter.config().inferences_per_cycle;

    for _ in 0..inferences_per_cycle * 2 {
        plotter.update(0.01);

        let display = mock_display(&mut plotter);
        let circle = display.last_circle.unwrap();
        assert!(display.circle_on_screen(&circle), "{:?} is off screen", circle);

        let point = plotter.last_point().unwrap();
        if point.x < 6.2 {
            assert!(
                (point.y - point.x.sin()).abs() < 0.02,
                "sin({}) plotted as {}",
                point.x,
                point.y,
            );
        }
    }

    assert_eq!(plotter.inference_count(), inferences_per_cycle * 2);
    assert_eq!(plotter.pipeline().unwrap().cycle.count(), 0);
}

#[test]
fn cycle_repeats_identically() {
    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let config = PlotterConfig {
        inferences_per_cycle: 50,
        ..PlotterConfig::default()
    };

    let mut plotter = Plotter::new(config, &mut approximator, &mut display, &mut logger);

    for _ in 0..150 {
        plotter.update(0.01);
    }
    drop(plotter);

    assert_eq!(logger.data_points.len(), 150);
    assert_eq!(logger.data_points[0..50], logger.data_points[50..100]);
    assert_eq!(logger.data_points[0..50], logger.data_points[100..150]);
}

#[test]
fn failed_inference_is_skipped() {
    let mut approximator = ApproximatorMock::new();
    approximator.fail_next_invocations = 3;
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let mut plotter = Plotter::new(
        PlotterConfig::default(),
        &mut approximator,
        &mut display,
        &mut logger,
    );

    for _ in 0..5 {
        plotter.update(0.01);
    }

    assert_eq!(plotter.state(), PlotterState::Plotting);
    assert_eq!(plotter.fault(), None);
    assert_eq!(plotter.inference_count(), 5);
    assert_eq!(plotter.failed_inferences(), 3);
    assert_eq!(plotter.pipeline().unwrap().cycle.count(), 5);

    // Failed samples are not retried, the first drawn sample is the fourth one
    let x_step = plotter.config().x_range as f64 / 1000.0;
    let point = plotter.last_point().unwrap();
    assert!((point.x - 4.0 * x_step).abs() < 1e-9);

    assert_eq!(mock_display(&mut plotter).circles_drawn, 2);
    drop(plotter);

    let failures = logger
        .data_points
        .iter()
        .filter(|data_point| matches!(data_point, PlotterDataPoint::InferenceFailed { .. }))
        .count();
    assert_eq!(failures, 3);
    assert_eq!(logger.data_points.len(), 5);
    assert_eq!(logger.data_points[0], PlotterDataPoint::InferenceFailed { x: 0.0 });
}

#[test]
fn update_interval_paces_inferences() {
    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let config = PlotterConfig {
        update_interval_s: 1.0,
        ..PlotterConfig::default()
    };

    let mut plotter = Plotter::new(config, &mut approximator, &mut display, &mut logger);

    for _ in 0..10 {
        plotter.update(0.25);
    }

    assert_eq!(plotter.inference_count(), 2);
}

#[test]
fn custom_colors_and_radius() {
    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::new();
    let mut logger = fixture_logger();

    let config = PlotterConfig {
        marker_radius_px: 4,
        marker_color: Rgb565::WHITE,
        background_color: Rgb565(0x001F),
        ..PlotterConfig::default()
    };

    let mut plotter = Plotter::new(config, &mut approximator, &mut display, &mut logger);
    plotter.update(0.01);

    let display = mock_display(&mut plotter);
    let circle = display.last_circle.unwrap();
    assert_eq!(circle.radius, 4);
    assert_eq!(circle.color, Rgb565::WHITE);
    assert_eq!((circle.x, circle.y), (4, 120));
    assert_eq!(display.last_clear_color, Some(Rgb565(0x001F)));
}

#[test]
fn samples_reach_paged_logger() {
    const PAGE_SIZE: usize = 256;
    let mut page0 = [0_u8; PAGE_SIZE];
    let mut page1 = [0_u8; PAGE_SIZE];

    let mut approximator = ApproximatorMock::new();
    let mut display = DisplayMock::new();
    let mut paged_logger =
        PagedDataLogger::<PlotterDataPoint, fn(&[u8; PAGE_SIZE]), PAGE_SIZE>::new(&mut page0, &mut page1, None);
    paged_logger.set_logging_enabled(true);

    let mut plotter = Plotter::new(
        PlotterConfig::default(),
        &mut approximator,
        &mut display,
        &mut paged_logger,
    );

    for _ in 0..3 {
        plotter.update(0.01);
    }
    drop(plotter);

    assert!(paged_logger.get_bytes_logged() > 0);

    let page = paged_logger.active_page().to_vec();
    let mut page_iter = page.iter();
    for _ in 0..3 {
        let data_point = paged_logger.retrieve_data_point(&mut page_iter).unwrap();
        assert!(matches!(data_point, PlotterDataPoint::Sample { .. }));
    }
    assert!(paged_logger.retrieve_data_point(&mut page_iter).is_none());
}
