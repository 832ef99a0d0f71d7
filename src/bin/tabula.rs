use std::io::{BufRead, Write, stdin, stdout};

use miette::{IntoDiagnostic, Result, miette};
use tracing_subscriber::EnvFilter;

use tabula::{ColumnDef, DataType, SEPARATOR, Table, Value};

fn default_schema() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", DataType::String),
        ColumnDef::new("age", DataType::Int),
        ColumnDef::new("score", DataType::Double),
        ColumnDef::new("team", DataType::Categorical),
    ]
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabula=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(false)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();

    init_tracing();

    // Column specs come from the command line as `name:TYPE`.
    let columns = std::env::args()
        .skip(1)
        .map(|spec| spec.parse::<ColumnDef>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut table = if columns.is_empty() {
        let mut table = Table::new("people", default_schema())?;

        table.append_row(vec![
            Value::from("Ann"),
            Value::Int(30),
            Value::Double(9.5),
            Value::from("red"),
        ])?;
        table.append_row(vec![
            Value::from("Bob"),
            Value::from("41"),
            Value::Float(7.25),
            Value::from("blue"),
        ])?;

        let row = table.add_row();
        row.set_string("name", "Charlie")?;
        row.set_string("age", "35")?;
        row.set_long("score", 8)?;
        row.set_string("team", "red")?;

        tracing::info!(
            age_as_double = row.get_double("age")?,
            score_as_int = row.get_int("score")?,
            team_code = row.get_int("team")?,
            "coerced reads"
        );

        table
    } else {
        Table::new("input", columns)?
    };

    let header = table.catalog().names().join(SEPARATOR.to_string().as_str());
    println!("{header}");
    for row in table.rows() {
        row.print()?;
    }

    let mut buf = String::new();

    let mut stdin = stdin().lock();
    let mut stdout = stdout().lock();

    loop {
        stdout.write_all(b"tabula> ").into_diagnostic()?;
        stdout.flush().into_diagnostic()?;

        buf.clear();
        let Ok(read) = stdin.read_line(&mut buf) else {
            return Err(miette!("Input reading failed"));
        };

        let input = buf.trim_end_matches(['\r', '\n']);
        if read == 0 || input == "exit" {
            break;
        }

        if input == "rows" {
            for row in table.rows() {
                row.write(&mut stdout)?;
            }
            continue;
        }

        // Anything else is a new row, one tab-separated field per column.
        let values = input.split(SEPARATOR).map(Value::from).collect();
        match table.append_row(values) {
            Ok(row) => row.write(&mut stdout)?,
            Err(err) => println!("{:?}", miette::Report::new(err)),
        }
    }

    println!("Exiting tabula");

    Ok(())
}
