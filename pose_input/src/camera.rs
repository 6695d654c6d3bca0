//! Webcam capture + single-pose inference via OpenCV (feature `camera`).
//!
//! The model is a MoveNet-style single-pose network in ONNX form: input is
//! one RGB image, output is `[1, 1, 17, 3]` — seventeen COCO-order
//! keypoints as `(y, x, score)` in normalized image coordinates. Only the
//! shoulders and wrists are consumed; if any of the four scores falls
//! under the confidence floor the whole frame reports no landmarks.

use log::{info, warn};
use opencv::core::{Mat, Scalar, Size, CV_32F};
use opencv::prelude::*;
use opencv::{dnn, imgproc, videoio};

use crate::landmarks::{Frame, Landmark, Landmarks};
use crate::source::{PoseSample, PoseSource};

/// COCO keypoint indices in the model output.
const KP_LEFT_SHOULDER: usize = 5;
const KP_RIGHT_SHOULDER: usize = 6;
const KP_LEFT_WRIST: usize = 9;
const KP_RIGHT_WRIST: usize = 10;
const KEYPOINTS: usize = 17;

/// Square input edge the model expects.
const INPUT_SIZE: i32 = 192;

/// Keypoints scored under this are treated as absent.
const SCORE_MIN: f32 = 0.3;

// ════════════════════════════════════════════════════════════════════════════
// CameraSource
// ════════════════════════════════════════════════════════════════════════════

/// Exclusively-owned webcam plus the loaded pose network. The device is
/// acquired once at startup and released when this drops, on every exit
/// path.
pub struct CameraSource {
    cap: videoio::VideoCapture,
    net: dnn::Net,
}

impl CameraSource {
    /// Open camera `index` and load the pose model. Either failure is
    /// fatal to the process — there is no game without a camera — so it is
    /// surfaced here, before any state loop starts.
    pub fn open(index: i32, model_path: &str) -> Result<Self, String> {
        let cap = videoio::VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|e| format!("camera open failed: {e}"))?;
        if !cap.is_opened().map_err(|e| e.to_string())? {
            return Err(format!("camera {index} is not available"));
        }
        let net = dnn::read_net_from_onnx(model_path)
            .map_err(|e| format!("pose model load failed ({model_path}): {e}"))?;
        info!("camera {index} opened, pose model loaded from {model_path}");
        Ok(CameraSource { cap, net })
    }

    fn infer(&mut self, bgr: &Mat) -> Option<Landmarks> {
        let blob = dnn::blob_from_image(
            bgr,
            1.0 / 255.0,
            Size::new(INPUT_SIZE, INPUT_SIZE),
            Scalar::default(),
            true, // BGR → RGB
            false,
            CV_32F,
        )
        .ok()?;
        self.net.set_input(&blob, "", 1.0, Scalar::default()).ok()?;
        let out = match self.net.forward_single("") {
            Ok(m) => m,
            Err(e) => {
                warn!("pose inference failed: {e}");
                return None;
            }
        };

        let data = out.data_typed::<f32>().ok()?;
        if data.len() < KEYPOINTS * 3 {
            warn!("unexpected pose output length {}", data.len());
            return None;
        }

        // (y, x, score) triplets, normalized to [0, 1].
        let kp = |i: usize| {
            (
                Landmark {
                    x: data[i * 3 + 1],
                    y: data[i * 3],
                },
                data[i * 3 + 2],
            )
        };
        let (left_shoulder, s0) = kp(KP_LEFT_SHOULDER);
        let (right_shoulder, s1) = kp(KP_RIGHT_SHOULDER);
        let (left_wrist, s2) = kp(KP_LEFT_WRIST);
        let (right_wrist, s3) = kp(KP_RIGHT_WRIST);

        if s0 < SCORE_MIN || s1 < SCORE_MIN || s2 < SCORE_MIN || s3 < SCORE_MIN {
            return None;
        }

        Some(Landmarks {
            left_shoulder,
            right_shoulder,
            left_wrist,
            right_wrist,
        })
    }
}

impl PoseSource for CameraSource {
    fn sample(&mut self) -> Option<PoseSample> {
        let mut bgr = Mat::default();
        let ok = self.cap.read(&mut bgr).unwrap_or(false);
        if !ok || bgr.empty() {
            return None; // transient read miss — caller carries on
        }

        let landmarks = self.infer(&bgr);
        let frame = mat_to_frame(&bgr);
        Some(PoseSample { landmarks, frame })
    }
}

/// BGR `Mat` → packed-ARGB [`Frame`] for the framebuffer blit.
fn mat_to_frame(bgr: &Mat) -> Option<Frame> {
    let mut rgba = Mat::default();
    imgproc::cvt_color(bgr, &mut rgba, imgproc::COLOR_BGR2RGBA, 0).ok()?;

    let width = rgba.cols() as usize;
    let height = rgba.rows() as usize;
    let bytes = rgba.data_bytes().ok()?;

    let mut pixels = Vec::with_capacity(width * height);
    for px in bytes.chunks_exact(4) {
        pixels.push(
            0xFF00_0000 | ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32,
        );
    }
    Some(Frame {
        width,
        height,
        pixels,
    })
}
