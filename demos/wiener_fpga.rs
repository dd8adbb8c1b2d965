use std::env;

use fpga_wiener::{
    compare, save_coe, WienerFilter, DEFAULT_NOISE_VARIANCE, FRAME_HEIGHT, FRAME_WIDTH,
};
use image::imageops::{self, FilterType};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if !(3..=5).contains(&args.len()) {
        eprintln!(
            "Usage: {} <input_image> <output_image> [noise_variance] [output.coe]",
            args[0]
        );
        eprintln!("Example: {} tiger.png filtered.png 500 filtered.coe", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let noise_variance: u32 = match args.get(3) {
        Some(value) => value.parse().map_err(|_| "Invalid noise variance")?,
        None => DEFAULT_NOISE_VARIANCE,
    };

    // Grayscale and scale to the capture board's frame size
    let source = image::open(input_path)?.into_luma8();
    println!(
        "Processing Luma8 image: {}x{} -> {}x{}",
        source.width(),
        source.height(),
        FRAME_WIDTH,
        FRAME_HEIGHT
    );
    let frame = imageops::resize(&source, FRAME_WIDTH, FRAME_HEIGHT, FilterType::CatmullRom);

    let filtered = frame.wiener_filter(noise_variance)?;
    filtered.save(output_path)?;

    if let Some(coe_path) = args.get(4) {
        save_coe(coe_path, &filtered)?;
        println!("COE dump saved to: {}", coe_path);
    }

    println!(
        "Wiener filter (noise variance={}) applied successfully!",
        noise_variance
    );
    println!("Output saved to: {}", output_path);
    println!();
    println!("{}", compare(&frame, &filtered)?);

    Ok(())
}
