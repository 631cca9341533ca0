// CLI entry for pixseg
use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueHint};
use log::info;
use pixseg::filter::{MAX_MASK_SIZE, SmoothOptions, gaussian_smooth_with};
use pixseg::io::{read_image, write_image};
use pixseg::region::{ConnectivityType, DEFAULT_MERGE_TOLERANCE, SegmentOptions, Session};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixseg", version, about = "Graph-based color image segmentation")]
struct Cli {
    /// Input image path
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Output path for the colored region map
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Merge tolerance; larger values give fewer, larger regions
    #[arg(short = 'k', long = "k", default_value_t = DEFAULT_MERGE_TOLERANCE)]
    k: f64,
    /// Gaussian mask size (even sizes grow by one)
    #[arg(
        long = "mask-size",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_MASK_SIZE))
    )]
    mask_size: u32,
    /// Gaussian sigma
    #[arg(long = "sigma", default_value_t = 1.0)]
    sigma: f64,
    /// Segment the input as-is, without smoothing
    #[arg(long = "no-smooth", action = ArgAction::SetTrue)]
    no_smooth: bool,

    /// Use 4-way instead of 8-way pixel neighborhoods
    #[arg(long = "four-way", action = ArgAction::SetTrue)]
    four_way: bool,
    /// Run the three channel passes on one thread
    #[arg(long = "sequential", action = ArgAction::SetTrue)]
    sequential: bool,
    /// Seed for region display colors
    #[arg(long = "seed", default_value_t = 0x5EED)]
    seed: u64,

    /// Pixel `x,y` whose region joins the merge; the first one is the anchor
    #[arg(long = "select", value_parser = parse_point)]
    select: Vec<(u32, u32)>,
    /// Output path for the merged region in source colors on black
    #[arg(long = "merged-output", value_hint = ValueHint::FilePath, requires = "select")]
    merged_output: Option<PathBuf>,
    /// Output path for the plain-text region report
    #[arg(long = "report", value_hint = ValueHint::FilePath)]
    report: Option<PathBuf>,
}

fn parse_point(s: &str) -> std::result::Result<(u32, u32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y; got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok((x, y))
}

fn segment_options(cli: &Cli) -> SegmentOptions {
    SegmentOptions {
        k: cli.k,
        connectivity: if cli.four_way {
            ConnectivityType::FourWay
        } else {
            ConnectivityType::EightWay
        },
        parallel: !cli.sequential,
        color_seed: cli.seed,
    }
}

fn run(cli: &Cli) -> Result<()> {
    let merged_anchor = match (&cli.merged_output, cli.select.first()) {
        (Some(_), None) => bail!("--merged-output needs at least one --select"),
        (_, anchor) => anchor.copied(),
    };

    let source = read_image(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        source.width(),
        source.height()
    );

    let raster = if cli.no_smooth {
        source
    } else {
        let smooth = SmoothOptions {
            mask_size: cli.mask_size,
            sigma: cli.sigma,
        };
        gaussian_smooth_with(&source, &smooth).context("smoothing failed")?
    };

    let mut session =
        Session::segment(&raster, &segment_options(cli)).context("segmentation failed")?;
    info!("{} regions with k = {}", session.region_count(), cli.k);

    if !cli.select.is_empty() {
        for &(x, y) in &cli.select {
            session
                .select(x, y)
                .with_context(|| format!("cannot select ({x}, {y})"))?;
        }
        let root = session.merge_selection().context("merge failed")?;
        info!(
            "merged {} selections into region {}; {} regions remain",
            cli.select.len(),
            root,
            session.region_count()
        );
    }

    let map = session.render()?;
    write_image(&map, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("wrote region map to {}", cli.output.display());

    if let (Some(path), Some((x, y))) = (&cli.merged_output, merged_anchor) {
        let region = session.render_region(x, y)?;
        write_image(&region, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote merged region to {}", path.display());
    }

    if let Some(path) = &cli.report {
        session
            .save_report(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote report to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4"), Ok((3, 4)));
        assert_eq!(parse_point(" 10 , 0 "), Ok((10, 0)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("-1,2").is_err());
    }

    #[test]
    fn test_cli_maps_to_options() {
        let cli = Cli::parse_from([
            "pixseg",
            "in.png",
            "out.png",
            "-k",
            "500",
            "--four-way",
            "--sequential",
            "--select",
            "1,2",
            "--select",
            "3,4",
        ]);
        let opts = segment_options(&cli);
        assert_eq!(opts.k, 500.0);
        assert_eq!(opts.connectivity, ConnectivityType::FourWay);
        assert!(!opts.parallel);
        assert_eq!(cli.select, vec![(1, 2), (3, 4)]);
        assert_eq!(cli.mask_size, 5);
    }

    #[test]
    fn test_cli_rejects_bad_combinations() {
        fn parse(extra: &[&str]) -> std::result::Result<Cli, clap::Error> {
            let mut args = vec!["pixseg", "in.png", "out.png"];
            args.extend_from_slice(extra);
            Cli::try_parse_from(args)
        }
        assert!(parse(&["--merged-output", "m.png"]).is_err());
        assert!(parse(&["--mask-size", "4294967295"]).is_err());
        assert!(parse(&["--mask-size", "1024"]).is_err());
        let cli = parse(&["--mask-size", "1023"]).unwrap();
        assert_eq!(cli.mask_size, MAX_MASK_SIZE);
    }

    #[test]
    fn test_run_checks_merge_request_before_io() {
        let dir = std::env::temp_dir().join(format!("pixseg_cli_early_{}", std::process::id()));
        let output = dir.join("out.png");
        let cli = Cli {
            input: dir.join("missing.png"),
            output: output.clone(),
            k: DEFAULT_MERGE_TOLERANCE,
            mask_size: 5,
            sigma: 1.0,
            no_smooth: true,
            four_way: false,
            sequential: false,
            seed: 0x5EED,
            select: Vec::new(),
            merged_output: Some(dir.join("merged.png")),
            report: None,
        };
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("--select"));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = std::env::temp_dir().join(format!("pixseg_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.png");
        let raster = pixseg::Raster::from_fn(8, 8, |x, _| {
            if x < 4 {
                pixseg::Rgb::BLACK
            } else {
                pixseg::Rgb::WHITE
            }
        })
        .unwrap();
        write_image(&raster, &input).unwrap();

        let output = dir.join("out.png");
        let merged = dir.join("merged.png");
        let report = dir.join("report.txt");
        let args: Vec<OsString> = vec![
            "pixseg".into(),
            input.clone().into(),
            output.clone().into(),
            "--no-smooth".into(),
            "-k".into(),
            "0".into(),
            "--select".into(),
            "7,7".into(),
            "--merged-output".into(),
            merged.clone().into(),
            "--report".into(),
            report.clone().into(),
        ];
        let cli = Cli::parse_from(args);
        run(&cli).unwrap();

        assert_eq!(std::fs::read_to_string(&report).unwrap(), "2\n32\n32\n");
        let region = read_image(&merged).unwrap();
        assert_eq!(region.get_pixel(7, 0), Some(pixseg::Rgb::WHITE));
        assert_eq!(region.get_pixel(0, 0), Some(pixseg::Rgb::BLACK));
        assert!(read_image(&output).is_ok());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
