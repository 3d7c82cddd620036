//! Transfer curve dump for plotting.

use anyhow::{Result, bail};
use clap::Args;
use waveshaper_effects::{Curve, ParamKey};

use super::common::parse_curve;

#[derive(Args)]
pub struct CurveArgs {
    /// Curve: sine, quad, factor or gb (or 1-4)
    curve: String,

    /// Curve amount (defaults to the parameter default)
    #[arg(short, long)]
    amount: Option<f32>,

    /// Number of points
    #[arg(short = 'n', long, default_value = "101")]
    points: usize,

    /// Input range, sampled from -RANGE to +RANGE
    #[arg(long, default_value = "1.0")]
    range: f32,
}

pub fn run(args: CurveArgs) -> Result<()> {
    let curve = parse_curve(&args.curve)?;
    let points = curve_points(curve, args.amount, args.points, args.range)?;

    println!("input,output");
    for (x, y) in points {
        println!("{x:.6},{y:.6}");
    }
    Ok(())
}

/// Sample the curve at `points` evenly spaced inputs.
pub fn curve_points(
    curve: Curve,
    amount: Option<f32>,
    points: usize,
    range: f32,
) -> Result<Vec<(f32, f32)>> {
    if points < 2 {
        bail!("need at least 2 points, got {points}");
    }
    if !range.is_finite() || range <= 0.0 {
        bail!("range must be a positive number, got {range}");
    }

    let desc = ParamKey::amount_for(curve).descriptor();
    let amount = match amount {
        Some(a) if !desc.contains(a) => {
            let clamped = desc.clamp(a);
            tracing::warn!(
                "amount {a} outside [{}, {}] for {}; using {clamped}",
                desc.min,
                desc.max,
                curve.name()
            );
            clamped
        }
        Some(a) => a,
        None => desc.default,
    };

    let coeffs = curve.prepare(amount);
    let step = 2.0 * range / (points - 1) as f32;
    Ok((0..points)
        .map(|i| {
            let x = -range + i as f32 * step;
            (x, coeffs.apply(x))
        })
        .collect())
}
