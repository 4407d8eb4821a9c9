//! Command-line interface for the search engines, the constraint solver and puzzle tooling

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};

use crate::algorithm::backtracker::{
    Backtracker, LogReporter, Placement, SearchMode, SearchOutcome, SearchReporter,
    SilentReporter,
};
use crate::algorithm::executor::{
    ConstraintSolver, TrialOutcome, TrialResult, corner_permutations,
};
use crate::algorithm::swappable::SwappableEdgeBacktracker;
use crate::analysis::indices::CandidateIndices;
use crate::analysis::statistics::IndexStatistics;
use crate::io::configuration::{
    DEFAULT_BORDER_COLOURS, DEFAULT_INTERIOR_COLOURS, DEFAULT_PIECES_PATH, DEFAULT_SEED,
    KNOWN_CLUES, NUM_CORNERS,
};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::io::export::{format_placement, write_placement, write_tables};
use crate::io::pieces::{load_pieces, write_pieces};
use crate::io::progress::{SearchSpinner, TrialProgress};
use crate::io::visualization::render_placement;
use crate::spatial::generator::PlantedPuzzle;
use crate::spatial::geometry::Orientation;
use crate::spatial::grid::Cell;
use crate::spatial::path::PathKind;
use crate::spatial::tiles::{Category, PlacedTile, TileCatalog};

#[derive(Parser)]
#[command(name = "eternity-solver")]
#[command(
    author,
    version,
    about = "Backtracking and constraint propagation for 16x16 edge-matching puzzles"
)]
/// Command-line arguments shared by every subcommand
pub struct Cli {
    /// Pieces file, one tile per line as four colour codes N E S W
    #[arg(short, long, global = true, default_value = DEFAULT_PIECES_PATH)]
    pub pieces: PathBuf,

    /// Random seed for shuffling and generation
    #[arg(short, long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Shuffle tile ids within each category before searching
    #[arg(long, global = true)]
    pub shuffle: bool,

    /// Only log warnings and hide progress
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug output and display every solution found
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Exhaustive backtracking search along a visitation order
    Backtrack(SearchArgs),
    /// Border-only search collapsing interchangeable edges
    Swappable(SearchArgs),
    /// Constraint propagation over every choice of three corners
    Constraint(ConstraintArgs),
    /// Export the tile and mid pair tables
    Tables {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Log index distribution statistics
    Stats,
    /// Write a generated puzzle with a planted solution
    Generate(GenerateArgs),
}

/// Options for the search subcommands
#[derive(Args)]
pub struct SearchArgs {
    /// Visitation order
    #[arg(long, value_enum, default_value_t = PathKind::Scanrow)]
    pub path: PathKind,

    /// Number of cells to place; defaults to the whole path
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Stop at the first placement reaching the depth
    #[arg(long)]
    pub first: bool,

    /// Write the found placement to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options for the constraint subcommand
#[derive(Args)]
pub struct ConstraintArgs {
    /// Skip fixing the published clue tiles
    #[arg(long)]
    pub no_clues: bool,

    /// Extra tile to fix, as category:id:orientation:row:col
    #[arg(long = "fix", value_name = "FIX")]
    pub fixes: Vec<String>,

    /// Run a single trial with these corner ids at top-left, top-right and bottom-left
    #[arg(long, value_delimiter = ',')]
    pub corners: Option<Vec<usize>>,
}

/// Options for the generate subcommand
#[derive(Args)]
pub struct GenerateArgs {
    /// Output pieces file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of border colours
    #[arg(long, default_value_t = DEFAULT_BORDER_COLOURS)]
    pub border_colours: usize,

    /// Number of interior colours
    #[arg(long, default_value_t = DEFAULT_INTERIOR_COLOURS)]
    pub interior_colours: usize,

    /// Also write the planted solution to this file
    #[arg(long)]
    pub solution: Option<PathBuf>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

/// Parse a tile fix written as `category:id:orientation:row:col`
///
/// # Errors
///
/// Returns an error if the text does not have five fields or a field does not parse
pub fn parse_fix(text: &str) -> Result<(Cell, PlacedTile)> {
    let fields: Vec<&str> = text.split(':').collect();
    let [category, id, orientation, row, col] = fields.as_slice() else {
        return Err(invalid_parameter(
            "fix",
            &text,
            &"expected category:id:orientation:row:col",
        ));
    };

    let category = Category::from_name(category)
        .ok_or_else(|| invalid_parameter("fix", &text, &format!("unknown category '{category}'")))?;
    let orientation = Orientation::from_name(orientation).ok_or_else(|| {
        invalid_parameter("fix", &text, &format!("unknown orientation '{orientation}'"))
    })?;
    let number = |field: &str| {
        field.parse::<usize>().map_err(|error| {
            invalid_parameter("fix", &text, &format!("'{field}' is not a number: {error}"))
        })
    };

    Ok((
        Cell::new(number(row)?, number(col)?),
        PlacedTile::new(category, number(id)?, orientation),
    ))
}

/// Check a `--corners` list: three distinct corner ids for the top-left,
/// top-right and bottom-left cells
///
/// # Errors
///
/// Returns an error if there are not exactly three ids, an id is not a corner
/// or an id repeats
pub fn parse_corners(corners: &[usize]) -> Result<[usize; 3]> {
    let &[top_left, top_right, bottom_left] = corners else {
        return Err(invalid_parameter(
            "corners",
            &format!("{corners:?}"),
            &"expected three corner ids",
        ));
    };

    if let Some(id) = corners.iter().find(|&&id| id >= NUM_CORNERS) {
        return Err(invalid_parameter(
            "corners",
            &format!("{corners:?}"),
            &format!("corner id {id} is not below {NUM_CORNERS}"),
        ));
    }
    if top_left == top_right || top_left == bottom_left || top_right == bottom_left {
        return Err(invalid_parameter(
            "corners",
            &format!("{corners:?}"),
            &"corner ids must be distinct",
        ));
    }

    Ok([top_left, top_right, bottom_left])
}

/// Runs the selected subcommand
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if loading, validation, search setup or writing output fails
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Backtrack(args) => self.backtrack(args, false),
            Command::Swappable(args) => self.backtrack(args, true),
            Command::Constraint(args) => self.constraint(args),
            Command::Tables { output } => {
                let indices = self.load_indices()?;
                write_tables(output, &indices)?;
                log::info!("Tables written to {}", output.display());
                Ok(())
            }
            Command::Stats => {
                let indices = self.load_indices()?;
                log::info!("{}", IndexStatistics::gather(&indices));
                Ok(())
            }
            Command::Generate(args) => self.generate(args),
        }
    }

    fn load_indices(&self) -> Result<CandidateIndices> {
        let raw = load_pieces(&self.cli.pieces)?;
        let mut catalog = TileCatalog::from_raw(&raw)?;
        if self.cli.shuffle {
            log::info!("Shuffling tile ids with seed {}", self.cli.seed);
            catalog = catalog.shuffled(self.cli.seed);
        }
        Ok(CandidateIndices::new(catalog))
    }

    fn backtrack(&self, args: &SearchArgs, swappable: bool) -> Result<()> {
        let indices = self.load_indices()?;
        let path = args.path.build()?;
        let depth = args.depth.unwrap_or_else(|| path.len());
        let mode = if args.first {
            SearchMode::FirstSolution
        } else if self.cli.verbose {
            SearchMode::Display
        } else {
            SearchMode::Count
        };

        let mut spinner = self
            .cli
            .should_show_progress()
            .then(|| SearchSpinner::new(&format!("{:?}", args.path)));
        let mut log_reporter = LogReporter;
        let mut silent = SilentReporter;
        let reporter: &mut dyn SearchReporter = match (&mut spinner, self.cli.quiet) {
            (Some(spinner), _) => spinner,
            (None, true) => &mut silent,
            (None, false) => &mut log_reporter,
        };

        let start = Instant::now();
        let outcome = if swappable {
            SwappableEdgeBacktracker::new(&indices, &path, depth, mode)?.solve(reporter)
        } else {
            Backtracker::new(&indices, &path, depth, mode)?.solve(reporter)
        };
        if let Some(spinner) = &spinner {
            spinner.finish();
        }

        match outcome {
            SearchOutcome::Found(placement) => {
                log::info!(
                    "Found a placement of {} tiles in {:.2?}",
                    placement.len(),
                    start.elapsed()
                );
                self.emit_placement(indices.catalog(), &placement, args.output.as_deref())
            }
            SearchOutcome::Exhausted { solutions } => {
                log::info!(
                    "Search exhausted: {solutions} solutions at depth {depth} in {:.2?}",
                    start.elapsed()
                );
                Ok(())
            }
        }
    }

    // Allow print for the placement, the command's actual output
    #[allow(clippy::print_stdout)]
    fn emit_placement(
        &self,
        catalog: &TileCatalog,
        placement: &Placement,
        output: Option<&Path>,
    ) -> Result<()> {
        if let Some(path) = output {
            write_placement(path, catalog, placement)?;
            log::info!("Placement written to {}", path.display());
        } else {
            print!("{}", format_placement(catalog, placement));
        }
        if !self.cli.quiet {
            log::info!("\n{}", render_placement(placement));
        }
        Ok(())
    }

    // Allow print for user feedback on each trial
    #[allow(clippy::print_stderr)]
    fn constraint(&self, args: &ConstraintArgs) -> Result<()> {
        let indices = self.load_indices()?;
        let clues = if args.no_clues {
            Vec::new()
        } else {
            KNOWN_CLUES.to_vec()
        };
        let fixes = args
            .fixes
            .iter()
            .map(|text| parse_fix(text))
            .collect::<Result<Vec<_>>>()?;
        let solver = ConstraintSolver::new(indices.catalog(), clues).with_extra_fixes(fixes);

        if let Some(corners) = &args.corners {
            let constraints = solver.solve_trial(Some(parse_corners(corners)?))?;
            log::info!(
                "Trial finished: {} ({} cells solved)",
                constraints.score(),
                constraints.solved_cells().len()
            );
            return Ok(());
        }

        let progress = self
            .cli
            .should_show_progress()
            .then(|| TrialProgress::new(corner_permutations().len()));
        let results = solver.solve_all_corner_permutations_with(|result| {
            if let Some(progress) = &progress {
                progress.complete(result);
            }
        });
        if let Some(progress) = &progress {
            progress.finish();
        }

        for TrialResult { corners, outcome } in &results {
            match outcome {
                TrialOutcome::Completed(score) => log::info!("Corners {corners:?}: {score}"),
                TrialOutcome::Infeasible(score) => {
                    log::info!("Corners {corners:?}: infeasible {score}");
                }
                TrialOutcome::Aborted(reason) => {
                    if !self.cli.quiet {
                        eprintln!("Corners {corners:?}: aborted, {reason}");
                    }
                }
            }
        }

        let feasible = results
            .iter()
            .filter(|result| matches!(result.outcome, TrialOutcome::Completed(_)))
            .count();
        log::info!("{feasible} of {} corner trials still feasible", results.len());
        Ok(())
    }

    fn generate(&self, args: &GenerateArgs) -> Result<()> {
        let puzzle = PlantedPuzzle::generate(
            self.cli.seed,
            args.border_colours,
            args.interior_colours,
        )?;
        write_pieces(&args.output, &puzzle.tiles)?;
        log::info!(
            "Generated puzzle with {} border and {} interior colours written to {}",
            args.border_colours,
            args.interior_colours,
            args.output.display()
        );

        if let Some(solution_path) = &args.solution {
            let catalog = TileCatalog::from_raw(&puzzle.tiles)?;
            let path = PathKind::Scanrow.build()?;
            let placement = Placement::from_path(&path, puzzle.solution());
            if placement.mismatches(&catalog) != 0 {
                return Err(PuzzleError::InvalidPlacement {
                    reason: "generated solution does not match its own tiles".to_string(),
                });
            }
            write_placement(solution_path, &catalog, &placement)?;
        }
        Ok(())
    }
}
