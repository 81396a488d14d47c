use crate::model::{Board, Shift};
use anyhow::Context;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Import de gardes: header `start,end,department` (RFC3339 UTC)
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let start = rec.get(0).context("missing start")?.trim();
        let end = rec.get(1).context("missing end")?.trim();
        let department = rec.get(2).context("missing department")?.trim();
        if department.is_empty() {
            anyhow::bail!("empty department on row {}", line + 1);
        }
        let start: DateTime<Utc> = start.parse().context("start RFC3339")?;
        let end: DateTime<Utc> = end.parse().context("end RFC3339")?;
        let shift = Shift::checked(start, end, department)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("row {}", line + 1))?;
        out.push(shift);
    }
    Ok(out)
}

pub fn import_board_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Board> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let board: Board = serde_json::from_slice(&data).with_context(|| "parsing board json")?;
    Ok(board)
}

/// Export JSON du board, écrit de manière atomique.
pub fn export_board_json<P: AsRef<Path>>(path: P, board: &Board) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(board)?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export CSV des gardes: header `id,pool,start,end,department,duration_hours`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, board: &Board) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "pool", "start", "end", "department", "duration_hours"])?;
    let pools = [("mine", &board.mine), ("available", &board.available)];
    let mut hours = itoa::Buffer::new();
    for (pool, shifts) in pools {
        for s in shifts.iter() {
            let start = s.start.to_rfc3339();
            let end = s.end.to_rfc3339();
            w.write_record([
                s.id.as_str(),
                pool,
                start.as_str(),
                end.as_str(),
                s.department.as_str(),
                hours.format(s.duration_hours()),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Export CSV de l'historique: header `id,sender,original,requested,status,incoming`
pub fn export_trades_csv<P: AsRef<Path>>(path: P, board: &Board) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "sender", "original", "requested", "status", "incoming"])?;
    for t in &board.trades {
        let requested = t.requested_shift.as_ref().map(|s| s.id.as_str()).unwrap_or("");
        w.write_record([
            t.id.as_str(),
            t.sender.as_str(),
            t.original_shift.id.as_str(),
            requested,
            t.status().as_str(),
            if t.is_incoming { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
