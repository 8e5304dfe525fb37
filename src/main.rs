use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_t, App, AppSettings, Arg, ArgMatches,
    SubCommand,
};
use derive_more::Display;
use graphlets::{
    data::{from_sqlite, read_edge_list},
    pattern::{Colored, Directed, EdgeModel, PatternFactory, PatternIterator, Signed, Simple},
    task::{build_equations, build_tree, Task},
};
use log::info;
use std::error::Error;

#[derive(Debug, Display, PartialEq)]
enum Err {
    #[display(fmt = "order must be at least {}", _0)]
    OrderTooSmall(usize),
}

impl std::error::Error for Err {}

enum ModelKind {
    Simple,
    Directed,
    Colored(u8),
    Signed,
}

impl ModelKind {
    fn new(matches: &ArgMatches) -> Result<Self, clap::Error> {
        Ok(match matches.value_of("model").unwrap() {
            "simple" => ModelKind::Simple,
            "directed" => ModelKind::Directed,
            "colored" => ModelKind::Colored(value_t!(matches, "colors", u8)?),
            "signed" => ModelKind::Signed,
            _ => unreachable!(),
        })
    }
}

/// Runs `$handler` with the edge model selected on the command line.
macro_rules! with_model {
    ($matches:expr, $handler:ident) => {
        match ModelKind::new($matches)? {
            ModelKind::Simple => $handler(Simple, $matches),
            ModelKind::Directed => $handler(Directed, $matches),
            ModelKind::Colored(colors) => $handler(Colored::new(colors), $matches),
            ModelKind::Signed => $handler(Signed, $matches),
        }
    };
}

fn parse_order(matches: &ArgMatches, min: usize) -> Result<usize, Box<dyn Error>> {
    let order = value_t!(matches, "order", usize)?;
    if order < min {
        return Err(Err::OrderTooSmall(min).into());
    }
    Ok(order)
}

fn factory<M: EdgeModel>(model: M, matches: &ArgMatches) -> PatternFactory<M> {
    PatternFactory::new(model, matches.is_present("orbits"))
}

fn handle_count<M: EdgeModel>(model: M, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let order = parse_order(matches, 1)?;
    let path = matches.value_of("GRAPH").unwrap();
    let graph = if matches.is_present("sqlite") {
        from_sqlite(model.clone(), &rusqlite::Connection::open(path)?)?
    } else {
        read_edge_list(model.clone(), path)?
    };
    let prepared = Task::new(&factory(model, matches), order)
        .equations(matches.is_present("equations"))
        .prepare();
    let start_time = std::time::Instant::now();
    print!("{}", prepared.count(&graph));
    info!("total_time: {}", start_time.elapsed().as_millis());
    Ok(())
}

fn handle_tree<M: EdgeModel>(model: M, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let order = parse_order(matches, 1)?;
    print!("{}", build_tree(&factory(model, matches), order));
    Ok(())
}

fn handle_equations<M: EdgeModel>(model: M, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let order = parse_order(matches, 2)?;
    let factory = factory(model, matches);
    let tree = build_tree(&factory, order - 1);
    print!("{}", build_equations(&factory, order, &tree));
    Ok(())
}

fn handle_patterns<M: EdgeModel>(model: M, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let order = parse_order(matches, 1)?;
    let factory = factory(model, matches);
    for pattern in PatternIterator::new(&factory, order) {
        println!("{} /{}", pattern, pattern.symmetry_factor());
    }
    Ok(())
}

fn pattern_args() -> [Arg<'static, 'static>; 4] {
    [
        Arg::with_name("model")
            .help("The edge model of patterns and host graph")
            .long("model")
            .takes_value(true)
            .default_value("simple")
            .possible_values(&["simple", "directed", "colored", "signed"]),
        Arg::with_name("colors")
            .help("Number of edge colors of the colored model")
            .long("colors")
            .takes_value(true)
            .default_value("2")
            .possible_values(&["1", "2", "3", "4", "5", "6", "7", "8", "9"]),
        Arg::with_name("order")
            .help("The number of pattern nodes")
            .long("order")
            .takes_value(true)
            .required(true),
        Arg::with_name("orbits")
            .help("Roots every pattern at node 0 and counts per host node")
            .long("orbits")
            .takes_value(false),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("count")
                .about("Counts every connected pattern up to the order in the graph")
                .after_help(
                    r"Edge list files start with the number of nodes, followed by one
`src dst [label]` line per edge. With --sqlite, GRAPH must contain:

  CREATE TABLE vertices (vid INT, vlabel INT);
  CREATE TABLE edges (src INT, dst INT, elabel INT);",
                )
                .args(&pattern_args())
                .arg(
                    Arg::with_name("equations")
                        .help("Counts the largest order through equations")
                        .long("equations")
                        .takes_value(false),
                )
                .arg(
                    Arg::with_name("sqlite")
                        .help("Reads GRAPH as an SQLite3 database")
                        .long("sqlite")
                        .takes_value(false),
                )
                .arg(Arg::with_name("GRAPH").required(true)),
        )
        .subcommand(
            SubCommand::with_name("tree")
                .about("Displays the decision tree")
                .args(&pattern_args()),
        )
        .subcommand(
            SubCommand::with_name("equations")
                .about("Displays the equations deriving the order from a smaller tree")
                .args(&pattern_args()),
        )
        .subcommand(
            SubCommand::with_name("patterns")
                .about("Lists the connected patterns of the order")
                .args(&pattern_args()),
        )
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("count") {
        with_model!(matches, handle_count)?;
    } else if let Some(matches) = matches.subcommand_matches("tree") {
        with_model!(matches, handle_tree)?;
    } else if let Some(matches) = matches.subcommand_matches("equations") {
        with_model!(matches, handle_equations)?;
    } else if let Some(matches) = matches.subcommand_matches("patterns") {
        with_model!(matches, handle_patterns)?;
    }
    Ok(())
}
