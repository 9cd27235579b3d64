use argh::FromArgs;
use std::{path::PathBuf, process::ExitCode, time::Instant};

use pixfilter::{
    image::PixelBuffer,
    imgproc::{
        color::gray_from_rgb,
        filter::{self, EdgeOptions, GradientMode},
        threshold::threshold_binary,
    },
    io::functional::{read_image_any, write_image_any},
};

#[derive(FromArgs, Debug)]
/// Apply a raster filter to a PNG or JPEG image
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Median(MedianArgs),
    Gaussian(GaussianArgs),
    Edges(EdgesArgs),
    Convolve(ConvolveArgs),
    Threshold(ThresholdArgs),
}

#[derive(FromArgs, Debug)]
/// Median blur
#[argh(subcommand, name = "median")]
struct MedianArgs {
    /// path to an input png or jpeg image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image, png or jpeg
    #[argh(option, short = 'o', default = "PathBuf::from(\"median.png\")")]
    output: PathBuf,

    /// side of the window, odd and at least 3
    #[argh(option, short = 'k', default = "3")]
    kernel_size: usize,
}

#[derive(FromArgs, Debug)]
/// Gaussian blur
#[argh(subcommand, name = "gaussian")]
struct GaussianArgs {
    /// path to an input png or jpeg image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image, png or jpeg
    #[argh(option, short = 'o', default = "PathBuf::from(\"gauss.png\")")]
    output: PathBuf,

    /// side of the kernel, odd
    #[argh(option, short = 'k')]
    kernel_size: usize,

    /// standard deviation of the gaussian, positive
    #[argh(option, short = 's')]
    sigma: f32,
}

#[derive(FromArgs, Debug)]
/// Sobel edge detection
#[argh(subcommand, name = "edges")]
struct EdgesArgs {
    /// path to an input png or jpeg image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image, png or jpeg
    #[argh(option, short = 'o', default = "PathBuf::from(\"edges.png\")")]
    output: PathBuf,

    /// combine raw gradients instead of clamping each pass to [0, 255]
    #[argh(switch)]
    unclamped: bool,
}

#[derive(FromArgs, Debug)]
/// Convolution with a uniform kernel
#[argh(subcommand, name = "convolve")]
struct ConvolveArgs {
    /// path to an input png or jpeg image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image, png or jpeg
    #[argh(option, short = 'o', default = "PathBuf::from(\"conv.png\")")]
    output: PathBuf,

    /// side of the kernel, odd
    #[argh(option, short = 'k', default = "3")]
    kernel_size: usize,
}

#[derive(FromArgs, Debug)]
/// Grayscale conversion followed by a binary threshold
#[argh(subcommand, name = "threshold")]
struct ThresholdArgs {
    /// path to an input png or jpeg image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the thresholded image, png or jpeg
    #[argh(option, short = 'o', default = "PathBuf::from(\"thresh.png\")")]
    output: PathBuf,

    /// path to the intermediate grayscale image, png or jpeg
    #[argh(option, default = "PathBuf::from(\"gray.png\")")]
    gray_output: PathBuf,

    /// threshold in [0, 255]
    #[argh(option, short = 't', default = "128")]
    threshold: i32,
}

impl Command {
    fn input(&self) -> &PathBuf {
        match self {
            Command::Median(args) => &args.input,
            Command::Gaussian(args) => &args.input,
            Command::Edges(args) => &args.input,
            Command::Convolve(args) => &args.input,
            Command::Threshold(args) => &args.input,
        }
    }

    /// Run the selected filter and return every image to write, in order.
    fn apply(
        &self,
        image: &PixelBuffer,
    ) -> Result<Vec<(PathBuf, PixelBuffer)>, Box<dyn std::error::Error>> {
        let outputs = match self {
            Command::Median(args) => {
                log::info!("median blur, kernel size {}", args.kernel_size);
                vec![(
                    args.output.clone(),
                    filter::median_blur(image, args.kernel_size)?,
                )]
            }
            Command::Gaussian(args) => {
                log::info!(
                    "gaussian blur, kernel size {}, sigma {}",
                    args.kernel_size,
                    args.sigma
                );
                vec![(
                    args.output.clone(),
                    filter::gaussian_blur(image, args.kernel_size, args.sigma)?,
                )]
            }
            Command::Edges(args) => {
                let gradient_mode = if args.unclamped {
                    GradientMode::Unclamped
                } else {
                    GradientMode::Clamped
                };
                log::info!("sobel edges, {gradient_mode:?} gradients");
                let options = EdgeOptions { gradient_mode };
                vec![(
                    args.output.clone(),
                    filter::sobel_edges_with_options(image, &options)?,
                )]
            }
            Command::Convolve(args) => {
                log::info!("uniform convolution, kernel size {}", args.kernel_size);
                vec![(
                    args.output.clone(),
                    filter::box_blur(image, args.kernel_size)?,
                )]
            }
            Command::Threshold(args) => {
                log::info!("grayscale and threshold at {}", args.threshold);
                let gray = gray_from_rgb(image)?;
                let binary = threshold_binary(&gray, args.threshold)?;
                vec![
                    (args.gray_output.clone(), gray),
                    (args.output.clone(), binary),
                ]
            }
        };

        Ok(outputs)
    }
}

fn run(command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    let image = read_image_any(command.input())?;
    log::info!(
        "read {} ({}, {} channels)",
        command.input().display(),
        image.size(),
        image.num_channels()
    );

    let start = Instant::now();
    let outputs = command.apply(&image)?;
    log::debug!("filter took {:?}", start.elapsed());

    for (path, output) in outputs.iter() {
        write_image_any(path, output)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Args = argh::from_env();

    match run(&args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
