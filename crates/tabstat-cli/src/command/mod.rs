use clap::{Parser, Subcommand};

use self::{
    covariance::CovarianceArg, describe::DescribeArg, frequency::FrequencyArg,
    transition::TransitionArg,
};

mod covariance;
mod describe;
mod frequency;
mod transition;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize numeric columns (mean, median, modes, variance, std dev)
    Describe(#[clap(flatten)] DescribeArg),
    /// Print the frequency table of a column
    Frequency(#[clap(flatten)] FrequencyArg),
    /// Print the population covariance of two columns
    Covariance(#[clap(flatten)] CovarianceArg),
    /// Print P(next = NEXT | current = GIVEN) over a sequential column
    Transition(#[clap(flatten)] TransitionArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Frequency(arg) => frequency::run(&arg)?,
        Mode::Covariance(arg) => covariance::run(&arg)?,
        Mode::Transition(arg) => transition::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tabstat_stats::value::Value;

    use super::*;

    fn parse_transition(next: &str, given: &str) -> TransitionArg {
        let args = CommandArgs::try_parse_from([
            "tabstat", "transition", "weather.json", "--column", "sky", "--next", next,
            "--given", given,
        ])
        .unwrap();
        match args.mode {
            Mode::Transition(arg) => arg,
            mode => panic!("unexpected subcommand: {mode:?}"),
        }
    }

    #[test]
    fn test_transition_values_parse_as_literals() {
        let arg = parse_transition("true", "1.5");
        assert_eq!(arg.column, "sky");
        assert_eq!(arg.next, Value::Bool(true));
        assert_eq!(arg.given, Value::Number(1.5));
    }

    #[test]
    fn test_transition_values_fall_back_to_text() {
        let arg = parse_transition("sunny", "True");
        assert_eq!(arg.next, Value::Text("sunny".into()));
        assert_eq!(arg.given, Value::Text("True".into()));
    }

    #[test]
    fn test_describe_columns_are_comma_separated() {
        let args =
            CommandArgs::try_parse_from(["tabstat", "describe", "menu.json", "--columns", "a,b"])
                .unwrap();
        let Mode::Describe(arg) = args.mode else {
            panic!("unexpected subcommand");
        };
        assert_eq!(arg.columns, ["a", "b"]);
        assert_eq!(arg.output, None);
    }
}
