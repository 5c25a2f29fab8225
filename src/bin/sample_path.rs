use pathblink::path::{Path, layout_targets, parse_svg_path};
use std::process::exit;

fn usage() -> ! {
    eprintln!("Usage: sample_path <elements> <svg-path-data> [scale]");
    exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        usage();
    }
    let Ok(count) = args[0].parse::<usize>() else {
        eprintln!("Invalid element count: {}", args[0]);
        usage();
    };
    let scale = match args.get(2).map(|s| s.parse::<f64>()) {
        None => 1.0,
        Some(Ok(scale)) => scale,
        Some(Err(_)) => {
            eprintln!("Invalid scale: {}", args[2]);
            usage();
        }
    };
    let path = match parse_svg_path(&args[1]) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Invalid path: {e}");
            exit(1);
        }
    };

    println!("Path length: {:.2}", path.total_length());
    println!("Segments: {}", path.segment_count());
    for (index, target) in layout_targets(&path, count, scale).iter().enumerate() {
        println!("{:>5}  {target}", index + 1);
    }
}
