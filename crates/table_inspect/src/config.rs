//! Configuration parsing for table inspection.

use anyhow::{Context, Result};
use dual_table::{BuildConfig, BuildFlags, MAX_DIMENSION, MAX_NUM_VERTICES};
use serde::Deserialize;
use std::path::Path;

/// Table build settings, read from TOML and overridden on the command line.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Cube dimension (1 to 4).
	#[serde(default = "default_dimension")]
	pub dimension: usize,
	/// Track negative components instead of positive ones.
	#[serde(default)]
	pub separate_negative: bool,
	/// Always separate diagonally opposite vertex pairs.
	#[serde(default)]
	pub always_separate_opposite: bool,
	/// Largest polytope vertex count accepted.
	#[serde(default = "default_max_vertices")]
	pub max_vertices: usize,
	/// Build entries on all cores.
	#[serde(default = "default_parallel")]
	pub parallel: bool,
}

fn default_dimension() -> usize {
	3
}

fn default_max_vertices() -> usize {
	MAX_NUM_VERTICES
}

fn default_parallel() -> bool {
	true
}

impl Default for Config {
	fn default() -> Self {
		Self {
			dimension: default_dimension(),
			separate_negative: false,
			always_separate_opposite: false,
			max_vertices: default_max_vertices(),
			parallel: default_parallel(),
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse configuration from TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		toml::from_str(content).with_context(|| "Failed to parse config TOML")
	}

	/// Reject settings no table can be built with.
	pub fn validate(&self) -> Result<()> {
		if self.dimension == 0 || self.dimension > MAX_DIMENSION {
			anyhow::bail!(
				"dimension must be between 1 and {}, got {}",
				MAX_DIMENSION,
				self.dimension
			);
		}
		if self.max_vertices < 2 {
			anyhow::bail!("max_vertices must be at least 2, got {}", self.max_vertices);
		}
		if (1usize << self.dimension) > self.max_vertices.min(MAX_NUM_VERTICES) {
			anyhow::bail!(
				"a {}-cube has {} vertices, max_vertices is {}",
				self.dimension,
				1usize << self.dimension,
				self.max_vertices
			);
		}
		Ok(())
	}

	pub fn build_flags(&self) -> BuildFlags {
		BuildFlags::new(self.separate_negative, self.always_separate_opposite)
	}

	pub fn build_config(&self) -> BuildConfig {
		BuildConfig::DEFAULT
			.with_max_vertices(self.max_vertices)
			.with_parallel(self.parallel)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_fill_missing_keys() {
		let config = Config::parse("dimension = 2").unwrap();
		assert_eq!(config.dimension, 2);
		assert!(!config.separate_negative);
		assert!(config.parallel);
		assert_eq!(config.max_vertices, MAX_NUM_VERTICES);
		assert_eq!(config.build_flags(), BuildFlags::DEFAULT);
	}

	#[test]
	fn test_full_config() {
		let config = Config::parse(
			r#"
			dimension = 4
			separate_negative = true
			always_separate_opposite = true
			max_vertices = 16
			parallel = false
			"#,
		)
		.unwrap();
		config.validate().unwrap();
		assert_eq!(config.build_flags(), BuildFlags::new(true, true));
		assert!(!config.build_config().parallel);
	}

	#[test]
	fn test_rejects_bad_dimension() {
		let mut config = Config::default();
		config.dimension = 0;
		assert!(config.validate().is_err());
		config.dimension = 5;
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_rejects_dimension_over_vertex_limit() {
		let config = Config::parse("dimension = 3\nmax_vertices = 4").unwrap();
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_rejects_unknown_types() {
		assert!(Config::parse("dimension = \"three\"").is_err());
	}
}
