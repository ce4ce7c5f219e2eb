use argh::FromArgs;
use std::path::PathBuf;

use kaleido::imgproc::KaleidoscopeParams;
use kaleido::io::{read_image_jpeg_rgb8, write_image_jpeg_rgb8, DEFAULT_JPEG_QUALITY};

#[derive(FromArgs)]
/// Turn a JPEG image into a kaleidoscope mosaic
struct Args {
    /// path to an input jpeg image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output jpeg image
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// number of slices of the mosaic
    #[argh(option, short = 'n', default = "6")]
    slices: usize,

    /// brightness factor of the background
    #[argh(option, default = "0.5")]
    dim: f32,

    /// scale of the wedge, at most 0.5
    #[argh(option, default = "0.3")]
    shrink: f32,

    /// jpeg quality of the output, from 0 to 100
    #[argh(option, default = "DEFAULT_JPEG_QUALITY")]
    quality: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let params = KaleidoscopeParams {
        slices: args.slices,
        dim_factor: args.dim,
        shrink: args.shrink,
    };
    params.validate()?;

    // read the image
    let mut image = read_image_jpeg_rgb8(&args.image_path)?;
    log::info!(
        "read {} from {} ({} bytes)",
        image.size(),
        args.image_path.display(),
        image.encoded_len()
    );

    params.apply(&mut image)?;

    write_image_jpeg_rgb8(&args.output_path, image, args.quality)?;
    log::info!("kaleidoscope written to {}", args.output_path.display());

    Ok(())
}
