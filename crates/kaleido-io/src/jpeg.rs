use crate::error::IoError;
use jpeg_encoder::{ColorType, Encoder};
use kaleido_image::{Image, ImageSize, COLOR_CHANNELS};
use std::{fs, path::Path};

/// Quality used when the caller has no preference, range from 0 (lowest) to 100 (highest).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Writes the given JPEG _(rgb8)_ data to the given file path.
///
/// The image is consumed: its pixel data is released once the call returns, whether
/// the write succeeded or not.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: Image<u8, COLOR_CHANNELS>,
    quality: u8,
) -> Result<(), IoError> {
    let (width, height) = jpeg_dims(image.size())?;
    let encoder = Encoder::new_file(file_path.as_ref(), quality)?;
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;

    log::debug!(
        "wrote {}x{} jpeg to {}",
        width,
        height,
        file_path.as_ref().display()
    );

    Ok(())
}

/// Encodes the given image _(rgb8)_ into JPEG bytes.
///
/// # Arguments
///
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn encode_image_jpeg_rgb8(
    image: &Image<u8, COLOR_CHANNELS>,
    quality: u8,
) -> Result<Vec<u8>, IoError> {
    let (width, height) = jpeg_dims(image.size())?;
    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    Ok(buffer)
}

/// Read a JPEG image with three channels _(rgb8)_.
///
/// Grayscale files are expanded to three channels. The byte length of the file is kept
/// as the encoded length of the image.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG file.
///
/// # Returns
///
/// A RGB image with three channels _(rgb8)_.
pub fn read_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
) -> Result<Image<u8, COLOR_CHANNELS>, IoError> {
    let file_path = file_path.as_ref().to_owned();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("jpg") && !ext.eq_ignore_ascii_case("jpeg")
    }) {
        return Err(IoError::InvalidFileExtension(file_path));
    }

    let jpeg_data = fs::read(&file_path)?;
    if jpeg_data.is_empty() {
        return Err(IoError::EmptyFile(file_path));
    }

    let image = decode_image_jpeg_rgb8(&jpeg_data)?;

    log::debug!(
        "read {} jpeg of {} bytes from {}",
        image.size(),
        jpeg_data.len(),
        file_path.display()
    );

    Ok(image.with_encoded_len(jpeg_data.len()))
}

/// Decodes a JPEG image with three channels _(rgb8)_ from raw bytes.
///
/// # Arguments
///
/// - `src` - Raw bytes of the jpeg file
pub fn decode_image_jpeg_rgb8(src: &[u8]) -> Result<Image<u8, COLOR_CHANNELS>, IoError> {
    let mut decoder = zune_jpeg::JpegDecoder::new(src);
    decoder.decode_headers()?;

    let image_info = decoder.info().ok_or_else(|| {
        IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
            "Failed to find image info from its metadata",
        )))
    })?;

    let image_size = ImageSize {
        width: image_info.width as usize,
        height: image_info.height as usize,
    };

    let mut img_data = decoder.decode()?;
    if img_data.len() == image_size.area() {
        img_data = img_data.iter().flat_map(|&v| [v; COLOR_CHANNELS]).collect();
    }

    Ok(Image::new(image_size, img_data)?)
}

fn jpeg_dims(size: ImageSize) -> Result<(u16, u16), IoError> {
    match (u16::try_from(size.width), u16::try_from(size.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(IoError::ImageTooLarge(size.width, size.height)),
    }
}
