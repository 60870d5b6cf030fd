//! Dual isosurface table inspector.
//!
//! Builds the configuration table of a d-cube and prints:
//! - a summary (entry counts, patch histogram, ambiguity counts, timings)
//! - single entries (signs, bipolar edges, incident patches, ambiguity)
//! - the list of ambiguous configurations
//!
//! Settings come from an optional TOML file; command-line flags override it.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use dual_table::{DualTable, PolytopeGeometry, TableIndex, TableStats};
use std::path::PathBuf;

use config::Config;

/// Dual isosurface configuration table inspector.
#[derive(Parser, Debug)]
#[command(name = "table_inspect")]
#[command(about = "Builds and inspects dual isosurface configuration tables")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Cube dimension (overrides config).
	#[arg(short, long)]
	dimension: Option<usize>,

	/// Track negative components.
	#[arg(long)]
	separate_negative: bool,

	/// Always separate diagonally opposite vertex pairs.
	#[arg(long)]
	separate_opposite: bool,

	/// Build on a single thread.
	#[arg(long)]
	sequential: bool,

	/// Print these table entries.
	#[arg(short, long)]
	entry: Vec<TableIndex>,

	/// List every ambiguous configuration.
	#[arg(long)]
	list_ambiguous: bool,

	/// Check table invariants and the sign mirror table.
	#[arg(long)]
	validate: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let mut config = match &args.config {
		Some(path) => {
			println!("Loading config from: {}", path.display());
			Config::load(path)?
		}
		None => Config::default(),
	};
	apply_overrides(&mut config, &args);
	config.validate()?;

	let mut table = DualTable::with_config(config.build_config());
	table
		.build(config.dimension, config.build_flags())
		.with_context(|| format!("Failed to build {}-cube table", config.dimension))?;

	print_summary(&table)?;

	for &it in &args.entry {
		print_entry(&table, it)?;
	}

	if args.list_ambiguous {
		list_ambiguous(&table)?;
	}

	if args.validate {
		validate(&table, &config)?;
	}

	Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
	if let Some(dimension) = args.dimension {
		config.dimension = dimension;
	}
	if args.separate_negative {
		config.separate_negative = true;
	}
	if args.separate_opposite {
		config.always_separate_opposite = true;
	}
	if args.sequential {
		config.parallel = false;
	}
}

fn print_summary(table: &DualTable) -> Result<()> {
	let stats = TableStats::from_table(table)?;
	let report = table.build_report()?;
	let flags = table.flags()?;

	println!(
		"\n{}-cube: {} vertices, {} edges, {} facets",
		stats.dimension,
		table.vertex_count().unwrap_or(0),
		table.edge_count().unwrap_or(0),
		table.facet_count().unwrap_or(0)
	);
	println!(
		"Policy: separate_negative={} always_separate_opposite={}",
		flags.separate_negative, flags.always_separate_opposite
	);
	println!(
		"Built {} entries in {:.3} ms (records {} us, ambiguity {} us, {} threads)",
		stats.entry_count,
		report.total_ms(),
		report.records_us,
		report.ambiguity_us,
		report.worker_threads
	);

	println!("\nPatches per entry:");
	for (count, &entries) in stats.entries_per_patch_count[..=stats.max_patch_count]
		.iter()
		.enumerate()
	{
		println!("  {:>2}: {}", count, entries);
	}
	println!("  average: {:.3}", stats.average_patches());

	println!(
		"\nAmbiguous entries: {} ({:.1}%), {} with ambiguous facets",
		stats.ambiguous_entries,
		stats.ambiguous_fraction() * 100.0,
		stats.entries_with_ambiguous_facets
	);

	Ok(())
}

fn print_entry(table: &DualTable, it: TableIndex) -> Result<()> {
	let record = table
		.entry(it)
		.with_context(|| format!("Cannot print entry {}", it))?;
	let ambiguity = table.ambiguity(it)?;
	let geometry = table
		.geometry()
		.context("Table has no geometry")?;

	let signs: String = (0..geometry.vertex_count())
		.map(|v| if table.is_positive(it, v).unwrap_or(false) { '+' } else { '-' })
		.collect();

	println!("\nEntry {} ({:#b}) signs {}", it, it, signs);
	println!(
		"  patches: {}, bipolar edges: {}",
		record.patch_count(),
		record.bipolar_edge_count()
	);
	for edge in 0..geometry.edge_count() {
		if let Some(patch) = record.incident_patch(edge) {
			let [v0, v1] = geometry.edge_endpoints(edge);
			println!("    edge {:>2} [{:>2}, {:>2}] -> patch {}", edge, v0, v1, patch);
		}
	}
	println!(
		"  ambiguous: {}, ambiguous facets: {:?}, active facets: {}",
		ambiguity.is_ambiguous,
		ambiguity.ambiguous_facets.iter().collect::<Vec<_>>(),
		ambiguity.active_facet_count
	);

	Ok(())
}

fn list_ambiguous(table: &DualTable) -> Result<()> {
	let ambiguous: Vec<TableIndex> = table
		.ambiguity_table()?
		.records()
		.iter()
		.enumerate()
		.filter(|(_, record)| record.is_ambiguous)
		.map(|(it, _)| it as TableIndex)
		.collect();

	println!("\n{} ambiguous configurations:", ambiguous.len());
	for chunk in ambiguous.chunks(8) {
		let line: Vec<String> = chunk.iter().map(|it| format!("{:>6}", it)).collect();
		println!("  {}", line.join(" "));
	}

	Ok(())
}

fn validate(table: &DualTable, config: &Config) -> Result<()> {
	table.validate().context("Table failed validation")?;
	println!("\n  ✓ table invariants");

	let mut mirror = DualTable::with_config(config.build_config());
	mirror.build(config.dimension, config.build_flags().mirrored())?;
	match table.validate_mirror(&mirror) {
		Ok(()) => println!("  ✓ sign mirror"),
		// The opposite-pair override may legitimately break the mirror.
		Err(err) if config.always_separate_opposite => println!("  ✗ sign mirror: {}", err),
		Err(err) => return Err(err).context("Sign mirror check failed"),
	}

	Ok(())
}
