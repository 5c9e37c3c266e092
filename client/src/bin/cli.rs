//! Cliente de línea de comandos: lee _queries_ de `stdin`, una por línea.
//!
//! Uso: `cli [config.json]`. Una línea vacía o `q` termina la sesión.

use {
    chrono::{DateTime, Utc},
    client::{config::ClientConfig, connection::Connection, query_result::QueryResult},
    protocol::{
        aliases::results::Result, messages::responses::result::rows::Rows,
        notations::value::Value,
    },
    std::{
        env::args,
        io::{stdin, stdout, BufRead, BufReader, Write},
        path::Path,
    },
};

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
    }
}

fn run() -> Result<()> {
    let config = match args().nth(1) {
        Some(path) => ClientConfig::load(Path::new(&path))?,
        None => ClientConfig::default(),
    };
    let mut connection = Connection::connect(&config)?;

    println!(
        "Conectado. Escribí una query por línea; una línea vacía o 'q' para salir.\n \
        ----------"
    );
    prompt(&connection);

    let reader = BufReader::new(stdin());
    for line in reader.lines() {
        let input = match line {
            Ok(input) => input,
            Err(e) => {
                eprintln!("Error leyendo la entrada: {}", e);
                break;
            }
        };
        let query = input.trim();
        if query.is_empty() || query.eq_ignore_ascii_case("q") {
            break;
        }

        match connection.query(query, None) {
            Ok(res) => print_result(res),
            Err(err) => eprintln!("{}", err),
        }
        if !connection.is_usable() {
            eprintln!("La conexión quedó inutilizable, saliendo.");
            break;
        }
        prompt(&connection);
    }
    Ok(())
}

fn prompt(connection: &Connection) {
    print!("{}> ", connection.keyspace().unwrap_or("cql"));
    let _ = stdout().flush();
}

fn print_result(res: QueryResult) {
    match res {
        QueryResult::Void => println!("OK"),
        QueryResult::SetKeyspace(keyspace) => println!("Usando keyspace '{}'", keyspace),
        QueryResult::Prepared(id) => println!("Preparada con ID de {} bytes", id.len()),
        QueryResult::SchemaChange {
            change,
            keyspace,
            table,
        } => {
            if table.is_empty() {
                println!("{} {}", change, keyspace);
            } else {
                println!("{} {}.{}", change, keyspace, table);
            }
        }
        QueryResult::Rows(rows) => print_rows(&rows),
    }
}

fn print_rows(rows: &Rows) {
    let header: Vec<&str> = rows.columns().iter().map(|col| col.name.as_str()).collect();
    println!("{}", header.join(" | "));
    for row in rows.iter() {
        let cells: Vec<String> = row.iter().map(|(_, value)| render(value)).collect();
        println!("{}", cells.join(" | "));
    }
    println!("({} filas)", rows.count());
}

/// Como el [Display] de [Value], pero con los _timestamps_ en formato RFC 3339.
fn render(value: &Value) -> String {
    match value {
        Value::Timestamp(secs) => match DateTime::<Utc>::from_timestamp(*secs, 0) {
            Some(date) => date.to_rfc3339(),
            None => secs.to_string(),
        },
        other => other.to_string(),
    }
}
