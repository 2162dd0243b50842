// src/output.rs
use crate::engine::PayoffPoint;
use crate::risk_free::RiskFreeSummary;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn write_series_csv(path: impl AsRef<Path>, series: &[PayoffPoint]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_series(&mut file, series)?;
    file.flush()
}

pub fn write_series<W: Write>(out: &mut W, series: &[PayoffPoint]) -> io::Result<()> {
    writeln!(out, "price,payoff")?;
    for point in series {
        writeln!(out, "{},{}", point.x, point.y)?;
    }
    Ok(())
}

/// Two-decimal P&L table, signed like the on-screen view
pub fn write_pnl_table_csv(path: impl AsRef<Path>, table: &[PayoffPoint]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_pnl_table(&mut file, table)?;
    file.flush()
}

pub fn write_pnl_table<W: Write>(out: &mut W, table: &[PayoffPoint]) -> io::Result<()> {
    writeln!(out, "underlying_price,total_pnl")?;
    for row in table {
        writeln!(out, "{:.2},{:+.2}", row.x, row.y)?;
    }
    Ok(())
}

pub fn write_risk_free_summary<W: Write>(out: &mut W, summary: &RiskFreeSummary) -> io::Result<()> {
    writeln!(out, "position,quantity,value_today,value_at_maturity")?;
    for row in &summary.rows {
        writeln!(
            out,
            "{},{},{:+.2},{:+.2}",
            row.kind.as_str(),
            row.quantity,
            row.value_today,
            row.value_at_maturity
        )?;
    }
    writeln!(
        out,
        "total,,{:+.2},{:+.2}",
        summary.total_today, summary.total_at_maturity
    )
}
