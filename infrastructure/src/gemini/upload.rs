//! Upload decoding and encoding for the multimodal call

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat as CodecFormat;
use solver_application::GatewayError;
use solver_domain::ImageFormat;

/// Check that `bytes` decode as a PNG or JPEG and return the real format.
///
/// The extension only gates the upload; the detected format decides the MIME
/// type sent to the model.
pub(crate) fn decode_upload(bytes: &[u8]) -> Result<ImageFormat, GatewayError> {
    let format = image::guess_format(bytes)
        .map_err(|e| GatewayError::InvalidImage(format!("unrecognized image data: {}", e)))?;

    let format = match format {
        CodecFormat::Png => ImageFormat::Png,
        CodecFormat::Jpeg => ImageFormat::Jpeg,
        other => {
            return Err(GatewayError::InvalidImage(format!(
                "unsupported image encoding: {:?}",
                other
            )));
        }
    };

    image::load_from_memory(bytes).map_err(|e| GatewayError::InvalidImage(e.to_string()))?;
    Ok(format)
}

pub(crate) fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
