//! Ghost File Utility
//!
//! A command-line tool for inspecting and editing Mario Kart 8 ghost files.
//!
//! # Features
//!
//! - **info**: Decode the filename and summarize the body
//! - **verify**: Check the filename against itself and against the body
//! - **extract-mii**: Dump the embedded Mii to a file
//! - **replace-mii**: Swap in another Mii and rename the ghost after it
//! - **change-track**: Move a ghost to another course, optionally linking a custom track
//! - **convert**: Write a staff, downloaded or player copy of a ghost
//! - **export**: Export the decoded filename and body fields as JSON
//! - **courses**: List the known courses
//!
//! # Configuration
//!
//! Pass `--config wraith.toml` to load codec settings; `WRAITH_*` environment variables
//! override the file (for example `WRAITH_LAYOUT=legacy`).
//!
//! # Usage
//!
//! ```bash
//! # Show a ghost
//! cargo run --example ghost_utils -- info sg1121...0000.dat
//!
//! # Verify a ghost
//! cargo run --example ghost_utils -- verify sg1121...0000.dat
//!
//! # Copy the Mii from one ghost into another
//! cargo run --example ghost_utils -- extract-mii a.dat mii.bin
//! cargo run --example ghost_utils -- replace-mii b.dat mii.bin
//!
//! # Move a ghost to Mario Kart Stadium, linked to a GameBanana mod
//! cargo run --example ghost_utils -- change-track gs...dat 27 --site game-banana --mod-id 100039 --mod-version 1.2.3
//!
//! # Convert to a downloaded ghost in slot 3
//! cargo run --example ghost_utils -- convert gs...dat out/ downloaded --slot 3
//!
//! # Export to JSON
//! cargo run --example ghost_utils -- export gs...dat ghost.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use wraith_rs::prelude::*;

#[derive(Parser)]
#[command(name = "ghost_utils")]
#[command(author = "wraith-rs project")]
#[command(version = "1.0")]
#[command(about = "Ghost file utility - inspect, verify, convert and edit MK8 ghosts", long_about = None)]
struct Cli {
	/// Codec settings file (TOML)
	#[arg(short, long, global = true, value_name = "CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode the filename and summarize the body
	Info {
		/// Ghost file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Check filename and body consistency
	Verify {
		/// Ghost file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Also check the header checksum
		#[arg(long)]
		checksum: bool,
	},

	/// Write the embedded Mii to a file
	ExtractMii {
		/// Ghost file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output Mii file path
		#[arg(value_name = "OUTPUT")]
		output: PathBuf,

		/// Accept Mii records with bad padding or checksum
		#[arg(long)]
		lenient: bool,
	},

	/// Replace the embedded Mii and rename the ghost
	ReplaceMii {
		/// Ghost file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Mii file path
		#[arg(value_name = "MII")]
		mii: PathBuf,
	},

	/// Move a ghost to another course
	ChangeTrack {
		/// Ghost file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Course id
		#[arg(value_name = "COURSE")]
		course: u32,

		/// Site hosting the custom track
		#[arg(long, value_name = "SITE", requires = "mod_id")]
		site: Option<SiteArg>,

		/// Mod id on the hosting site
		#[arg(long, value_name = "ID", requires = "site")]
		mod_id: Option<u32>,

		/// Mod version (major.minor.patch)
		#[arg(long, value_name = "VERSION", default_value = "1.0.0")]
		mod_version: String,
	},

	/// Write a converted copy of a ghost
	Convert {
		/// Ghost file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output directory
		#[arg(value_name = "OUTPUT_DIR")]
		output_dir: PathBuf,

		#[command(subcommand)]
		target: TargetCommand,
	},

	/// Export decoded fields to JSON
	Export {
		/// Ghost file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output JSON file path (stdout if omitted)
		#[arg(value_name = "OUTPUT")]
		output: Option<PathBuf>,
	},

	/// List the known courses
	Courses,
}

#[derive(Subcommand)]
enum TargetCommand {
	/// Staff ghost
	Staff,
	/// Downloaded ghost
	Downloaded {
		/// Download slot (0-15)
		#[arg(long, default_value_t = 0)]
		slot: u32,
	},
	/// Player ghost
	Player {
		/// Ghost number
		#[arg(long)]
		number: u32,
	},
}

impl From<TargetCommand> for ConversionTarget {
	fn from(target: TargetCommand) -> Self {
		match target {
			TargetCommand::Staff => ConversionTarget::Staff,
			TargetCommand::Downloaded {
				slot,
			} => ConversionTarget::Downloaded {
				slot,
			},
			TargetCommand::Player {
				number,
			} => ConversionTarget::Player {
				number,
			},
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SiteArg {
	/// Custom Track Wiki
	CtWiki,
	/// GameBanana
	GameBanana,
}

impl From<SiteArg> for ModSite {
	fn from(arg: SiteArg) -> Self {
		match arg {
			SiteArg::CtWiki => ModSite::CtWiki,
			SiteArg::GameBanana => ModSite::GameBanana,
		}
	}
}

/// JSON export of a ghost
#[derive(Serialize)]
struct GhostExport<'a> {
	filename: &'a GhostFilename,
	has_header: bool,
	body_size: usize,
	course: Option<&'static str>,
	body_course_id: Option<u32>,
	mii_name: Option<String>,
	mod_linkage: Option<ModLinkage>,
	mod_url: Option<String>,
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let config = CodecConfig::load(cli.config.as_deref()).context("Failed to load codec settings")?;

	match cli.command {
		Commands::Info {
			input,
			verbose,
		} => show_info(&input, &config, verbose),
		Commands::Verify {
			input,
			checksum,
		} => verify_ghost(&input, &config, checksum),
		Commands::ExtractMii {
			input,
			output,
			lenient,
		} => extract_mii(&input, &output, &config, lenient),
		Commands::ReplaceMii {
			input,
			mii,
		} => replace_mii(&input, &mii, &config),
		Commands::ChangeTrack {
			input,
			course,
			site,
			mod_id,
			mod_version,
		} => {
			let linkage = match (site, mod_id) {
				(Some(site), Some(mod_id)) => Some(ModLinkage::new(site.into(), mod_id, parse_version(&mod_version)?)),
				_ => None,
			};
			change_track(&input, course, linkage.as_ref(), &config)
		}
		Commands::Convert {
			input,
			output_dir,
			target,
		} => convert_ghost(&input, &output_dir, target.into(), &config),
		Commands::Export {
			input,
			output,
		} => export_json(&input, output.as_deref(), &config),
		Commands::Courses => {
			list_courses();
			Ok(())
		}
	}
}

fn open_ghost(input: &Path, config: &CodecConfig) -> Result<Ghost> {
	Ghost::open(input, config).with_context(|| format!("Failed to open {}", input.display()))
}

fn show_info(input: &Path, config: &CodecConfig, verbose: bool) -> Result<()> {
	let ghost = open_ghost(input, config)?;
	let record = ghost.record();
	let data = GameData::wii_u();

	println!("=== Ghost: {} ===", input.display());
	println!("Type:        {} #{}", record.ghost_type, record.ghost_number);
	println!("Version:     {:?}", record.game_version);
	println!("Player:      {}", record.playername);
	println!("Track:       {}", data.display(Lookup::Course, record.track_id));
	println!(
		"Character:   {} (variant {})",
		data.display(Lookup::Character, record.character_id),
		record.character_variant_id
	);
	println!("Kart:        {}", data.display(Lookup::Kart, record.kart_id));
	println!("Wheels:      {}", data.display(Lookup::Wheels, record.wheels_id));
	println!("Glider:      {}", data.display(Lookup::Glider, record.glider_id));
	println!("Flag:        {}", data.display(Lookup::Flag, record.flag_id));
	println!("Motion:      {}", if record.motion_control_flag != 0 { "yes" } else { "no" });
	println!("Total time:  {}", record.total_time);
	for (i, lap) in record.laps.iter().enumerate() {
		if let Some(lap) = lap
			&& *lap != LapTime::UNSET
		{
			println!("  Lap {}:     {lap}", i + 1);
		}
	}

	println!();
	println!("Header:      {}", if ghost.has_header() { "CTG0" } else { "none" });
	println!("Body size:   {} bytes", ghost.file().len());
	match ghost.mii_name() {
		Ok(name) => println!("Mii:         {name}"),
		Err(e) => println!("Mii:         <{e}>"),
	}
	match ghost.mod_linkage() {
		Ok(Some(linkage)) => println!("Custom track: {linkage}"),
		Ok(None) => {}
		Err(e) => println!("Custom track: <{e}>"),
	}

	if verbose {
		println!();
		println!("Mii location: {:?} (0x{:X})", ghost.mii_location(), ghost.mii_location().offset());
		if let Ok(Some(stored)) = ghost.file().stored_checksum() {
			println!("Stored CRC-32:   {stored:08X}");
		}
		if let Some(computed) = ghost.file().compute_checksum() {
			println!("Computed CRC-32: {computed:08X}");
		}
	}
	Ok(())
}

fn verify_ghost(input: &Path, config: &CodecConfig, checksum: bool) -> Result<()> {
	let ghost = open_ghost(input, config)?;
	ghost.verify().with_context(|| format!("{} failed verification", input.display()))?;
	if checksum {
		ghost.file().verify_checksum().context("Header checksum mismatch")?;
	}
	println!("✓ {} is consistent", input.display());
	Ok(())
}

fn extract_mii(input: &Path, output: &Path, config: &CodecConfig, lenient: bool) -> Result<()> {
	let ghost = open_ghost(input, config)?;
	let mii = ghost.extract_mii_with(config.strict_mii && !lenient)?;
	mii.save(output).with_context(|| format!("Failed to write {}", output.display()))?;
	println!("✓ Extracted Mii {:?} to {}", mii.name(), output.display());
	Ok(())
}

fn replace_mii(input: &Path, mii: &Path, config: &CodecConfig) -> Result<()> {
	let mii = MiiData::open(mii).with_context(|| format!("Failed to read {}", mii.display()))?;
	let mut ghost = open_ghost(input, config)?;
	let path = ghost.replace_mii(&mii)?;
	println!("✓ Replaced Mii, ghost is now {}", path.display());
	Ok(())
}

fn change_track(input: &Path, course: u32, linkage: Option<&ModLinkage>, config: &CodecConfig) -> Result<()> {
	let mut ghost = open_ghost(input, config)?;
	let path = ghost.change_track(course, linkage)?;
	println!("✓ Moved ghost to {}", path.display());
	Ok(())
}

fn convert_ghost(input: &Path, output_dir: &Path, target: ConversionTarget, config: &CodecConfig) -> Result<()> {
	if !output_dir.is_dir() {
		bail!("Output directory {} does not exist", output_dir.display());
	}
	let ghost = open_ghost(input, config)?;
	let path = ghost.export(output_dir, target)?;
	println!("✓ Wrote {target} to {}", path.display());
	Ok(())
}

fn export_json(input: &Path, output: Option<&Path>, config: &CodecConfig) -> Result<()> {
	let ghost = open_ghost(input, config)?;
	let linkage = ghost.mod_linkage().ok().flatten();
	let export = GhostExport {
		filename: ghost.record(),
		has_header: ghost.has_header(),
		body_size: ghost.file().len(),
		course: ghost.course().map(|course| course.name()),
		body_course_id: ghost.file().course_id().ok(),
		mii_name: ghost.mii_name().ok(),
		mod_linkage: linkage,
		mod_url: linkage.and_then(|linkage| linkage.url()),
	};

	let json = serde_json::to_string_pretty(&export)?;
	match output {
		Some(path) => {
			fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
			println!("✓ Exported to {}", path.display());
		}
		None => println!("{json}"),
	}
	Ok(())
}

fn list_courses() {
	let data = GameData::wii_u();
	println!("Courses ({} table):", data.revision());
	for course in data.courses() {
		println!("  {:3}  staff #{:2}  {}", course.id(), course.ghost_number(), course.name());
	}
}

fn parse_version(text: &str) -> Result<ModVersion> {
	let parts = text
		.trim_start_matches('v')
		.split('.')
		.map(|part| part.parse::<u8>().with_context(|| format!("Invalid version component {part:?}")))
		.collect::<Result<Vec<_>>>()?;
	match parts.as_slice() {
		[major, minor, patch] => Ok(ModVersion::new(*major, *minor, *patch)),
		_ => bail!("Version must look like major.minor.patch, got {text:?}"),
	}
}
