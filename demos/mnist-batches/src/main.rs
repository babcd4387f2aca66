// =============================================================================
// MNIST Batch Preparation — Vole Data Pipeline
// =============================================================================
//
// This demo decodes an MNIST-style dataset (IDX ubyte files, plain or .gz),
// normalizes the pixels, one-hot encodes the labels, and partitions both
// splits into batches with one shared shuffle order per split.
//
// Usage:
//   cargo run -p mnist-batches                           # synthetic data
//   cargo run -p mnist-batches -- --data-dir path/to/mnist
//   cargo run -p mnist-batches -- --batch-size 128 --seed 7
//   cargo run -p mnist-batches -- --fashion --range -1 1

use log::info;

use vole_data::{Dataset, LoadOptions, PixelRange, Variant};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

struct Config {
    data_dir: Option<String>,
    batch_size: usize,
    shuffle: bool,
    seed: Option<u64>,
    min: f32,
    max: f32,
    fashion: bool,
    samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            batch_size: 64,
            shuffle: true,
            seed: None,
            min: 0.0,
            max: 1.0,
            fashion: false,
            samples: 512,
        }
    }
}

fn parse_args() -> Config {
    let mut cfg = Config::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => {
                i += 1;
                cfg.data_dir = Some(args[i].clone());
            }
            "--batch-size" => {
                i += 1;
                cfg.batch_size = args[i].parse().expect("invalid --batch-size");
            }
            "--no-shuffle" => {
                cfg.shuffle = false;
            }
            "--seed" => {
                i += 1;
                cfg.seed = Some(args[i].parse().expect("invalid --seed"));
            }
            "--range" => {
                cfg.min = args[i + 1].parse().expect("invalid --range min");
                cfg.max = args[i + 2].parse().expect("invalid --range max");
                i += 2;
            }
            "--fashion" => {
                cfg.fashion = true;
            }
            "--samples" => {
                i += 1;
                cfg.samples = args[i].parse().expect("invalid --samples");
            }
            "--help" | "-h" => {
                println!("MNIST batch preparation demo for Vole");
                println!();
                println!("Options:");
                println!("  --data-dir <path>   Directory with the four IDX files (plain or .gz)");
                println!("  --batch-size <n>    Records per batch (default: 64)");
                println!("  --no-shuffle        Keep file order instead of shuffling");
                println!("  --seed <n>          Seed the shuffle for a reproducible run");
                println!("  --range <min> <max> Pixel range (default: 0 1)");
                println!("  --fashion           Decode as Fashion-MNIST");
                println!("  --samples <n>       Synthetic training records (default: 512)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    cfg
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render one 28x28 record as ASCII shades.
fn render(record: &[f32], min: f32, max: f32) {
    const SHADES: &[u8] = b" .:-=+*#%@";
    for row in record.chunks(28) {
        let line: String = row
            .iter()
            .map(|&v| {
                let t = (v - min) / (max - min);
                let idx = (t * (SHADES.len() - 1) as f32).round() as usize;
                SHADES[idx.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("    {line}");
    }
}

fn argmax(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> vole_data::Result<()> {
    env_logger::init();
    let cfg = parse_args();

    println!("=== Vole — MNIST Batch Preparation ===");
    println!();

    // ─────────────────────────────────────────────────────────────────────
    // 1. Build the dataset
    // ─────────────────────────────────────────────────────────────────────
    let variant = if cfg.fashion {
        Variant::FashionMnist
    } else {
        Variant::Mnist
    };
    let mut options = LoadOptions::default()
        .variant(variant)
        .pixel_range(PixelRange::new(cfg.min, cfg.max)?)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.shuffle);
    if let Some(seed) = cfg.seed {
        options = options.seed(seed);
    }

    let ds = match &cfg.data_dir {
        Some(dir) => {
            println!("Loading {} from: {dir}", variant.name());
            Dataset::load(dir, options)?
        }
        None => {
            println!(
                "Using synthetic data ({} train, {} validation records)",
                cfg.samples,
                cfg.samples / 4
            );
            println!("  Tip: use --data-dir <path> for real files");
            if let Some(url) = variant.base_url() {
                info!("compressed files are distributed at {url}");
            }
            Dataset::synthetic(cfg.samples, cfg.samples / 4, options)?
        }
    };
    println!();

    // ─────────────────────────────────────────────────────────────────────
    // 2. Summary
    // ─────────────────────────────────────────────────────────────────────
    println!("Dataset:");
    println!("  Variant: {}", ds.variant().name());
    println!("  Batch size: {}", ds.batch_size());
    println!("  Train batches: {}", ds.train_images().len());
    println!("  Validation batches: {}", ds.validation_images().len());
    println!(
        "  Pixels per record: {}  Classes: {}",
        ds.variant().pixel_count(),
        ds.variant().num_classes()
    );
    println!();

    // ─────────────────────────────────────────────────────────────────────
    // 3. Inspect the first training batch
    // ─────────────────────────────────────────────────────────────────────
    if let (Some(img_batch), Some(lbl_batch)) =
        (ds.train_images().first(), ds.train_labels().first())
    {
        let pixels: usize = img_batch.iter().map(|r| r.len()).sum();
        let sum: f32 = img_batch.iter().flatten().sum();
        println!("First training batch:");
        println!("  Records: {}", img_batch.len());
        println!("  Mean pixel value: {:.4}", sum / pixels as f32);

        println!("  First records:");
        for (img, lbl) in img_batch.iter().zip(lbl_batch).take(5) {
            let lo = img.iter().cloned().fold(f32::INFINITY, f32::min);
            let hi = img.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            println!(
                "    label {}  pixels in [{lo:.3}, {hi:.3}]",
                argmax(lbl)
            );
        }

        if ds.variant().image_dims() == (28, 28) {
            println!();
            println!("  Record 0 (label {}):", argmax(&lbl_batch[0]));
            render(&img_batch[0], cfg.min, cfg.max);
        }
    }

    println!();
    println!("=== Done! ===");
    Ok(())
}
