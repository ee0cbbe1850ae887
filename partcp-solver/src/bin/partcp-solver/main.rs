mod os_signal_termination;
mod result;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use partcp_solver::core::branching::value_selection::ValueSelectionStrategy;
use partcp_solver::core::branching::variable_selection::VariableSelectionStrategy;
use partcp_solver::core::convert_case::Case;
use partcp_solver::core::search::DepthFirstSearch;
use partcp_solver::core::search::RecordingListener;
use partcp_solver::core::statistics::configure_statistic_logging;
use partcp_solver::core::statistics::log_statistic_postfix;
use partcp_solver::core::statistics::should_log_statistics;
use partcp_solver::core::statistics::StatisticLogger;
use partcp_solver::core::termination::Combinator;
use partcp_solver::core::termination::TimeBudget;
use partcp_solver::core::Store;
use partcp_solver::models::Model;
use partcp_solver::models::PartPositioning;
use partcp_solver::models::PartStrand;
use partcp_solver::models::PartStrength;
use result::PartCpResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The model to solve.
    #[arg(value_enum)]
    model: ModelKind,

    /// The number of decision variables `x0`, `x1`, ...
    ///
    /// Defaults to 300 for `positioning`, 18 for `strand` and 3 for `strength`.
    #[arg(long)]
    num_variables: Option<i32>,

    /// The number of parts.
    ///
    /// Defaults to 300 for `positioning`, 380 for `strand` and 3 for `strength`.
    #[arg(long)]
    num_parts: Option<i32>,

    /// The minimum strength of the selected parts; only used by the `strength` model.
    #[arg(long, default_value_t = 200)]
    strength_threshold: i32,

    /// Determines which variable the search branches on next.
    #[arg(long, value_enum, default_value_t)]
    variable_selection: VariableSelectionStrategy,

    /// Determines the order in which the values of the selected variable are tried.
    #[arg(long, value_enum, default_value_t)]
    value_selection: ValueSelectionStrategy,

    /// The seed of the random generator used by the random value selection.
    #[arg(long = "random-seed", default_value_t = 42)]
    random_seed: u64,

    /// Stop after the first solution instead of enumerating all of them.
    #[arg(long)]
    first_solution: bool,

    /// Stop after the given number of solutions.
    #[arg(long)]
    solution_limit: Option<u64>,

    /// Only print the first given number of solutions; all solutions are still counted.
    #[arg(long)]
    record_limit: Option<usize>,

    /// The time budget for the search, in milliseconds.
    #[arg(short = 't', long = "time-limit")]
    time_limit: Option<u64>,

    /// Enables log message output from the solver.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Enables logging of statistics from the search.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,

    /// Prints the store after the model has been built.
    #[arg(long)]
    print_store: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModelKind {
    /// Positions the parts next to each other.
    Positioning,
    /// Selects the parts on the positive strand.
    Strand,
    /// Selects the parts whose strength reaches the threshold.
    Strength,
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging("%%%stat:", None, Some(Case::Camel), None);
    }

    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> PartCpResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics)?;

    if partcp_solver::core::asserts::PARTCP_ASSERT_LEVEL_DEFINITION
        >= partcp_solver::core::asserts::PARTCP_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the partcp assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            partcp_solver::core::asserts::PARTCP_ASSERT_LEVEL_DEFINITION
        );
    }

    let model = create_model(&args);

    let mut store = Store::default();
    let scope = model.build(&mut store)?;
    if args.print_store {
        println!("{store}");
    }

    let mut termination = Combinator::new(
        OsSignal::install()?,
        args.time_limit
            .map(|time_limit| TimeBudget::starting_now(Duration::from_millis(time_limit))),
    );

    let mut listener = match args.record_limit {
        Some(record_limit) => RecordingListener::with_record_limit(record_limit),
        None => RecordingListener::new(),
    };

    let summary = DepthFirstSearch::with_strategies(
        scope,
        args.variable_selection,
        args.value_selection,
    )
    .with_all_solutions(!args.first_solution)
    .with_solution_limit(args.solution_limit)
    .with_random_seed(args.random_seed)
    .labeling(&mut store, &mut termination, &mut listener)?;

    for solution in listener.solutions() {
        println!("{solution}");
    }

    if summary.is_unsatisfiable() {
        println!("UNSATISFIABLE");
    } else if !summary.is_complete() && summary.num_solutions() == 0 {
        println!("UNKNOWN");
    }
    println!("{} solutions", summary.num_solutions());
    println!(
        "processing time: {}sec",
        summary.statistics.time_spent.as_secs_f64()
    );

    if should_log_statistics() {
        summary.statistics.log(&StatisticLogger::default());
        log_statistic_postfix();
    }

    Ok(())
}

fn create_model(args: &Args) -> Box<dyn Model> {
    match args.model {
        ModelKind::Positioning => {
            let defaults = PartPositioning::default();
            Box::new(PartPositioning {
                num_variables: args.num_variables.unwrap_or(defaults.num_variables),
                num_parts: args.num_parts.unwrap_or(defaults.num_parts),
            })
        }
        ModelKind::Strand => {
            let defaults = PartStrand::default();
            Box::new(PartStrand {
                num_variables: args.num_variables.unwrap_or(defaults.num_variables),
                num_parts: args.num_parts.unwrap_or(defaults.num_parts),
            })
        }
        ModelKind::Strength => {
            let defaults = PartStrength::default();
            Box::new(PartStrength {
                num_variables: args.num_variables.unwrap_or(defaults.num_variables),
                num_parts: args.num_parts.unwrap_or(defaults.num_parts),
                strength_threshold: Some(args.strength_threshold),
            })
        }
    }
}
