//! QR encoding: text payload → black-on-white `GrayImage`.
//!
//! Symbols are generated at version 2 with error-correction level M, the
//! smallest configuration that holds a typical carrier tracking number with
//! margin to spare. Rendering keeps the four-module quiet zone; scanners
//! reject symbols without one.

use crate::error::Track2PdfError;
use image::{GrayImage, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};
use tracing::debug;

/// Symbol version tried first. Version 2 is 25×25 modules and holds up to
/// 26 bytes of arbitrary data at level M.
const PREFERRED_VERSION: Version = Version::Normal(2);
const EC_LEVEL: EcLevel = EcLevel::M;

/// Encode `payload` as a QR symbol rendered at `module_px` pixels per module.
///
/// Payloads that do not fit the preferred version fall back to automatic
/// version selection, so the symbol grows instead of the call failing. Only
/// payloads beyond QR capacity altogether error out; the ceiling depends on
/// the encoding mode the data selects, 2331 bytes of arbitrary data at
/// level M, more for digit-only or uppercase-alphanumeric payloads.
pub fn encode_qr(payload: &str, module_px: u32) -> Result<GrayImage, Track2PdfError> {
    let code = match QrCode::with_version(payload, PREFERRED_VERSION, EC_LEVEL) {
        Ok(code) => code,
        Err(QrError::DataTooLong) => {
            debug!(
                "Payload of {} bytes overflows version 2, selecting version automatically",
                payload.len()
            );
            QrCode::with_error_correction_level(payload, EC_LEVEL).map_err(|e| {
                Track2PdfError::QrEncodeFailed {
                    len: payload.len(),
                    reason: reason(e),
                }
            })?
        }
        Err(e) => {
            return Err(Track2PdfError::QrEncodeFailed {
                len: payload.len(),
                reason: reason(e),
            })
        }
    };

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(module_px, module_px)
        .build();

    debug!(
        "Encoded {} bytes → {}×{} px QR",
        payload.len(),
        image.width(),
        image.height()
    );
    Ok(image)
}

fn reason(e: QrError) -> String {
    match e {
        QrError::DataTooLong => "data too long".to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Version 2 (25 modules) plus a 4-module quiet zone on each side is
    // 33 modules; at 3 px/module that is 99 px.
    const V2_EDGE_PX: u32 = (25 + 8) * 3;

    #[test]
    fn tracking_number_fits_version_2() {
        let img = encode_qr("TRK-123456789", 3).expect("encode");
        assert_eq!(img.width(), V2_EDGE_PX);
        assert_eq!(img.height(), V2_EDGE_PX);
    }

    #[test]
    fn empty_payload_encodes() {
        let img = encode_qr("", 3).expect("encode");
        assert_eq!(img.width(), V2_EDGE_PX);
    }

    #[test]
    fn module_size_scales_the_raster() {
        let img = encode_qr("TRK-1", 5).expect("encode");
        assert_eq!(img.width(), (25 + 8) * 5);
    }

    #[test]
    fn long_payload_falls_back_to_a_larger_version() {
        let payload = "x".repeat(100);
        let img = encode_qr(&payload, 3).expect("encode");
        assert!(img.width() > V2_EDGE_PX);
    }

    #[test]
    fn oversized_payload_is_a_clean_error() {
        // Lowercase keeps the payload in byte mode, whose level-M ceiling is
        // 2331 bytes; uppercase would pack alphanumeric and still fit.
        let payload = "x".repeat(3000);
        let err = encode_qr(&payload, 3).unwrap_err();
        match err {
            Track2PdfError::QrEncodeFailed { len, reason } => {
                assert_eq!(len, 3000);
                assert_eq!(reason, "data too long");
            }
            other => panic!("expected QrEncodeFailed, got {other:?}"),
        }
    }

    #[test]
    fn quiet_zone_corner_is_white() {
        let img = encode_qr("TRK-1", 3).expect("encode");
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
    }
}
