use crate::{ExitReason, PipelineError, Preview};
use std::time::Duration;
use vista_base::{IntervalCounter, Tensor, fps_from_interval};
use vista_camera::{Camera, CameraError};
use vista_infer::{InferResponse, InferenceClient, Scaling, preprocess};

/// Draws an inference result onto the frame being shown.
pub trait Annotator {
    /// `fps` is `None` until a frame interval has been measured.
    fn annotate(&mut self, frame: &mut Tensor<u8>, result: &InferResponse, fps: Option<f32>);
}

impl<F> Annotator for F
where
    F: FnMut(&mut Tensor<u8>, &InferResponse, Option<f32>),
{
    fn annotate(&mut self, frame: &mut Tensor<u8>, result: &InferResponse, fps: Option<f32>) {
        self(frame, result, fps)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    scaling: Scaling,
    result_wait: Duration,
    fps_window: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scaling: Scaling::None,
            result_wait: Duration::ZERO,
            fps_window: 10,
        }
    }
}

impl PipelineConfig {
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// How long each iteration may wait for the previous frame's result.
    /// Zero never waits.
    pub fn with_result_wait(mut self, wait: Duration) -> Self {
        self.result_wait = wait;
        self
    }

    /// Number of frame intervals averaged for the FPS readout.
    pub fn with_fps_window(mut self, window: usize) -> Self {
        self.fps_window = window.max(1);
        self
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    pub fn result_wait(&self) -> Duration {
        self.result_wait
    }

    pub fn fps_window(&self) -> usize {
        self.fps_window
    }
}

/// Consecutive frames without a result before a non-waiting loop warns
/// that the server cannot keep up.
pub const SLOW_SERVER_FRAMES: u64 = 30;

/// What happened during a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineSummary {
    pub frames: u64,
    pub results: u64,
    pub exit: ExitReason,
}

/// Frame loop that overlaps remote inference with capture and display.
///
/// Each iteration captures frame n, shows it annotated with the result of
/// frame n-1 (when that has arrived) and then submits frame n. The client
/// keeps at most one request in flight, so whatever `poll` returns was
/// computed from the frame captured one iteration earlier.
pub struct Pipeliner<C, I, D, A> {
    camera: C,
    client: I,
    display: D,
    annotator: A,
    config: PipelineConfig,
    counter: IntervalCounter,
    missed: u64,
    slow_reported: bool,
}

impl<C, I, D, A> Pipeliner<C, I, D, A>
where
    C: Camera,
    I: InferenceClient,
    D: Preview,
    A: Annotator,
{
    pub fn new(camera: C, client: I, display: D, annotator: A, config: PipelineConfig) -> Self {
        let counter = IntervalCounter::new(config.fps_window);
        Self {
            camera,
            client,
            display,
            annotator,
            config,
            counter,
            missed: 0,
            slow_reported: false,
        }
    }

    /// Run until the preview reports an exit signal.
    ///
    /// Camera failures, display failures and frames that cannot be turned
    /// into model input end the run with an error. An undecodable frame is
    /// skipped and a failed inference only costs the annotation of one frame.
    pub async fn run(&mut self) -> Result<PipelineSummary, PipelineError> {
        let mut frames = 0u64;
        let mut results = 0u64;

        loop {
            let mut frame = match self.camera.recv().await {
                Ok(frame) => frame,
                Err(CameraError::Decode(e)) => {
                    log::warn!("dropping undecodable frame: {e}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let input = preprocess(&frame, self.client.input_spec(), self.config.scaling)?;

            let result = match self.client.poll(self.config.result_wait).await {
                Some(Ok(response)) => Some(response),
                Some(Err(e)) => {
                    log::warn!("inference failed: {e}");
                    None
                }
                None => None,
            };
            if frames > 0 {
                self.track_missed(result.is_some());
            }

            let fps = self.counter.measure().and_then(fps_from_interval);

            if let Some(result) = &result {
                self.annotator.annotate(&mut frame, result, fps);
                results += 1;
            }

            self.display.show(&frame)?;
            frames += 1;

            if let Some(exit) = self.display.poll_exit() {
                log::info!("stopping after {frames} frames ({results} annotated): {exit:?}");
                return Ok(PipelineSummary {
                    frames,
                    results,
                    exit,
                });
            }

            if let Err(e) = self.client.submit(input) {
                log::warn!("cannot submit frame {frames}: {e}");
            }
        }
    }

    fn track_missed(&mut self, got_result: bool) {
        if got_result {
            self.missed = 0;
            return;
        }
        self.missed += 1;
        if self.missed >= SLOW_SERVER_FRAMES && self.config.result_wait.is_zero() && !self.slow_reported {
            log::warn!(
                "no inference result in {} frames, each request is superseded before it completes; \
                 give the loop a result wait (--result-wait-ms) to see results from a slow server",
                self.missed
            );
            self.slow_reported = true;
        }
    }

    /// Frames shown in a row without a result since the last one arrived.
    pub fn missed_results(&self) -> u64 {
        self.missed
    }

    /// Whether the loop has warned that results never arrive in time.
    pub fn slow_server_reported(&self) -> bool {
        self.slow_reported
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn client(&self) -> &I {
        &self.client
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn into_parts(self) -> (C, I, D, A) {
        (self.camera, self.client, self.display, self.annotator)
    }
}
