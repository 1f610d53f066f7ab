// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, command, value_parser};

use crate::config::MAX_CHART_MONTHS;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(
            arg!(--jsonl "Print as JSON lines")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
}

fn chart_months_parser() -> clap::builder::RangedI64ValueParser<u32> {
    value_parser!(u32).range(1..=i64::from(MAX_CHART_MONTHS))
}

fn month_arg() -> Arg {
    arg!(--month <MONTH> "Month as YYYY-MM (defaults to the current month)").required(false)
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse income/expense transactions")
        .subcommand(
            Command::new("add")
                .about("Add a transaction")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_name("TYPE")
                        .help("income or expense")
                        .required(true),
                )
                .arg(arg!(--amount <AMOUNT> "Amount, grouping separators allowed").required(true))
                .arg(arg!(--category <CATEGORY>).required(true))
                .arg(
                    arg!(--source <SOURCE> "Bank, Cash or E-Wallet")
                        .required(false)
                        .default_value("Bank"),
                )
                .arg(arg!(--date <DATE> "YYYY-MM-DD (defaults to today)").required(false))
                .arg(arg!(--description <TEXT>).required(false)),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(month_arg())
                .arg(
                    arg!(--limit <N>)
                        .required(false)
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove a transaction")
                .arg(arg!(--id <ID>).required(true)),
        )
}

fn transfer_cmd() -> Command {
    Command::new("transfer")
        .about("Move balance between fund sources")
        .subcommand(
            Command::new("add")
                .about("Transfer an amount")
                .arg(arg!(--from <SOURCE>).required(true))
                .arg(arg!(--to <SOURCE>).required(true))
                .arg(arg!(--amount <AMOUNT>).required(true))
                .arg(arg!(--date <DATE> "YYYY-MM-DD (defaults to today)").required(false)),
        )
        .subcommand(json_flags(
            Command::new("list").about("Recent transfers").arg(
                arg!(--limit <N>)
                    .required(false)
                    .default_value("5")
                    .value_parser(value_parser!(usize)),
            ),
        ))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly category budgets")
        .subcommand(
            Command::new("set")
                .about("Set (or replace) a budget")
                .arg(arg!(--category <CATEGORY>).required(true))
                .arg(arg!(--amount <AMOUNT>).required(true))
                .arg(month_arg()),
        )
        .subcommand(Command::new("list").about("List budgets").arg(
            arg!(--month <MONTH> "Only this month (YYYY-MM)").required(false),
        ))
        .subcommand(json_flags(
            Command::new("status")
                .about("Spending against budgets")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove a budget")
                .arg(arg!(--category <CATEGORY>).required(true))
                .arg(month_arg()),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage expense categories")
        .subcommand(Command::new("list").about("List expense categories"))
        .subcommand(
            Command::new("add")
                .about("Add a custom category")
                .arg(arg!(--name <NAME>).required(true)),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename a custom category")
                .arg(arg!(--from <OLD>).required(true))
                .arg(arg!(--to <NEW>).required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a custom category")
                .arg(arg!(--name <NAME>).required(true)),
        )
        .subcommand(Command::new("reset").about("Restore the default categories"))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Balances, summaries and trends")
        .subcommand(json_flags(
            Command::new("balances").about("Balance per fund source"),
        ))
        .subcommand(json_flags(
            Command::new("monthly")
                .about("Income and expenses for one month")
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("range")
                .about("Income and expenses for a date range")
                .arg(
                    arg!(--preset <PRESET> "today, this-week, this-month or last-month")
                        .required(false)
                        .conflicts_with_all(["from", "to"]),
                )
                .arg(arg!(--from <DATE> "YYYY-MM-DD").required(false).requires("to"))
                .arg(arg!(--to <DATE> "YYYY-MM-DD").required(false).requires("from")),
        ))
        .subcommand(json_flags(
            Command::new("chart")
                .about("Trailing monthly income/expense series (in millions)")
                .arg(
                    arg!(--months <N> "Number of months, 1 to 120")
                        .required(false)
                        .value_parser(chart_months_parser()),
                ),
        ))
}

pub fn build_cli() -> Command {
    command!()
        .name("dompet")
        .arg(arg!(--"data-dir" <DIR> "Directory holding dompet.sqlite").required(false))
        .arg(arg!(-v --verbose "Debug logging").action(ArgAction::SetTrue))
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(tx_cmd())
        .subcommand(transfer_cmd())
        .subcommand(budget_cmd())
        .subcommand(category_cmd())
        .subcommand(report_cmd())
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("data")
                        .about("Full backup as JSON")
                        .arg(arg!(--out <PATH> "Output file (stdout when omitted)").required(false)),
                )
                .subcommand(
                    Command::new("transactions")
                        .about("Transactions as CSV or JSON")
                        .arg(arg!(--format <FORMAT> "csv or json").required(true))
                        .arg(arg!(--out <PATH>).required(true)),
                ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("data")
                    .about("Restore a JSON backup, replacing all data")
                    .arg(arg!(--path <PATH>).required(true))
                    .arg(
                        arg!(--yes "Confirm overwriting existing data")
                            .action(ArgAction::SetTrue),
                    ),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show").about("Print current settings"))
                .subcommand(
                    Command::new("set")
                        .about("Change settings")
                        .arg(arg!(--locale <LOCALE> "id or en").required(false))
                        .arg(
                            arg!(--"chart-months" <N> "Default chart length, 1 to 120")
                                .required(false)
                                .value_parser(chart_months_parser()),
                        ),
                ),
        )
}
