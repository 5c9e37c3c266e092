//! Módulo para tests de _queries_ contra un nodo.

mod common;

use client::{config::ClientConfig, connection::Connection, query_result::QueryResult};
use common::{error, ready, response, result, string, FakeNode, Received};
use protocol::{
    aliases::types::Byte,
    errors::{error::Error, error_code::UNKNOWN_ERROR_MSG},
    headers::opcode::Opcode,
    messages::{
        requests::query::Query,
        responses::{
            result::{
                col_spec::ColSpec,
                col_type::ColType,
                rows::{RawCell, Rows},
            },
            result_kinds::ResultKind,
        },
    },
    notations::{consistency::Consistency, value::Value},
};

/// Levanta un nodo que responde READY y después el guión dado, y se conecta a él.
fn session(script: Vec<Vec<Byte>>) -> (Connection, FakeNode) {
    let mut full_script = vec![ready()];
    full_script.extend(script);
    let node = FakeNode::start(full_script);

    let mut config = ClientConfig::with_hosts(&[node.host().as_str()]);
    config.stream_timeout_secs = 2;
    match Connection::connect(&config) {
        Ok(connection) => (connection, node),
        Err(err) => panic!("no se pudo conectar al nodo falso: {}", err),
    }
}

/// Cierra la sesión y devuelve las _queries_ que recibió el nodo, sin el STARTUP.
fn finish(connection: Connection, node: FakeNode) -> Vec<Received> {
    drop(connection);
    node.received().into_iter().skip(1).collect()
}

fn flights() -> Rows {
    let col = |name: &str, col_type: ColType| ColSpec::new("aerolineas", "vuelos", name, col_type);
    let columns = vec![
        col("id", ColType::Int),
        col("codigo", ColType::Varchar),
        col("activo", ColType::Boolean),
        col("salida", ColType::Timestamp),
        col("escalas", ColType::List(Box::new(ColType::Text))),
        col("capacidad", ColType::Bigint),
        col("origen", ColType::Inet),
    ];

    let escalas: Vec<Byte> = vec![0, 2, 0, 3, b'E', b'Z', b'E', 0, 3, b'M', b'D', b'Z'];
    let completa: Vec<RawCell> = vec![
        Some(vec![0, 0, 0, 42]),
        Some(b"AR1234".to_vec()),
        Some(vec![1]),
        Some(1_700_000_000_500_i64.to_be_bytes().to_vec()),
        Some(escalas),
        Some(300_i64.to_be_bytes().to_vec()),
        Some(vec![192, 168, 0, 1]),
    ];
    let incompleta: Vec<RawCell> = vec![
        Some(vec![0, 0, 0, 7]),
        None,
        None,
        // un timestamp de 2 bytes no se puede leer
        Some(vec![0, 1]),
        None,
        None,
        None,
    ];

    match Rows::new(columns, vec![completa, incompleta]) {
        Ok(rows) => rows,
        Err(err) => panic!("filas mal armadas: {}", err),
    }
}

fn rows_result(rows: &Rows) -> Vec<Byte> {
    result(ResultKind::Rows, rows.encode().unwrap_or_default())
}

#[test]
fn test_1_select_con_cursor() {
    let (mut connection, node) = session(vec![rows_result(&flights())]);

    let res = connection.query("SELECT * FROM vuelos", None);
    assert!(matches!(res, Ok(QueryResult::Rows(_))));
    if let Ok(QueryResult::Rows(mut rows)) = res {
        assert_eq!(rows.count(), 2);
        assert_eq!(rows.columns().len(), 7);

        rows.rewind();
        assert!(rows.valid());
        let first = rows.current();
        assert!(first.is_ok());
        if let Ok(row) = first {
            assert_eq!(row.get("id"), Some(&Value::Int(42)));
            assert_eq!(row.get("codigo"), Some(&Value::Text("AR1234".to_string())));
            assert_eq!(row.get("activo"), Some(&Value::Boolean(true)));
            assert_eq!(row.get("salida"), Some(&Value::Timestamp(1_700_000_001)));
            assert_eq!(
                row.get("escalas"),
                Some(&Value::List(vec![
                    Value::Text("EZE".to_string()),
                    Value::Text("MDZ".to_string())
                ]))
            );
            assert_eq!(row.get("capacidad"), Some(&Value::Varint("300".to_string())));
            assert_eq!(row.get("origen"), Some(&Value::Inet("192.168.0.1".to_string())));
        }

        rows.advance();
        assert_eq!(rows.position(), 1);
        let second = rows.current();
        assert!(second.is_ok());
        if let Ok(row) = second {
            assert_eq!(row.get_at(0), Some(&Value::Int(7)));
            assert!(row.iter().skip(1).all(|(_, value)| value.is_null()));
        }

        rows.advance();
        assert!(!rows.valid());
        assert!(matches!(rows.current(), Err(Error::IndexOutOfRange(_))));
    }

    finish(connection, node);
}

#[test]
fn test_2_iterar_no_mueve_el_cursor() {
    let (mut connection, node) = session(vec![rows_result(&flights())]);

    let res = connection.query("SELECT * FROM vuelos", None);
    assert!(res.is_ok());
    if let Ok(res) = res {
        let rows = res.rows();
        assert!(rows.is_some());
        if let Some(rows) = rows {
            let ids: Vec<Option<Value>> = rows.iter().map(|row| row.get("id").cloned()).collect();
            assert_eq!(ids, vec![Some(Value::Int(42)), Some(Value::Int(7))]);
            assert_eq!(rows.position(), 0);
            assert!(matches!(rows.row(2), Err(Error::IndexOutOfRange(_))));
        }
    }

    finish(connection, node);
}

#[test]
fn test_3_consistencia_de_las_queries() {
    let void = || result(ResultKind::Void, Vec::new());
    let (mut connection, node) = session(vec![void(), void()]);

    let insert = "INSERT INTO vuelos (id) VALUES (1)";
    assert_eq!(connection.query(insert, None), Ok(QueryResult::Void));
    assert_eq!(
        connection.query(insert, Some(Consistency::LocalOne)),
        Ok(QueryResult::Void)
    );

    let received = finish(connection, node);
    assert_eq!(received.len(), 2);
    assert_eq!(
        Ok(received[0].1.clone()),
        Query::new(insert, Consistency::Quorum).encode()
    );
    assert!(received[1].1.ends_with(&[0x00, 0x0A]));
}

#[test]
fn test_4_use_keyspace() {
    let (mut connection, node) = session(vec![
        result(ResultKind::SetKeyspace, string("aerolineas")),
        result(ResultKind::SetKeyspace, string("pasajeros")),
    ]);
    assert_eq!(connection.keyspace(), None);

    assert!(connection.use_keyspace("aerolineas").is_ok());
    assert_eq!(connection.keyspace(), Some("aerolineas"));

    let res = connection.query("USE pasajeros", None);
    assert_eq!(res, Ok(QueryResult::SetKeyspace("pasajeros".to_string())));
    assert_eq!(connection.keyspace(), Some("pasajeros"));

    assert!(matches!(
        connection.use_keyspace("pasajeros; DROP KEYSPACE x"),
        Err(Error::InvalidArgument(_))
    ));

    let received = finish(connection, node);
    assert_eq!(
        Ok(received[0].1.clone()),
        Query::new("USE aerolineas", Consistency::Quorum).encode()
    );
    assert_eq!(received.len(), 2);
}

#[test]
fn test_5_cambio_de_schema() {
    let mut change = string("CREATED");
    change.extend(string("aerolineas"));
    change.extend(string("vuelos"));
    let (mut connection, node) = session(vec![result(ResultKind::SchemaChange, change)]);

    let res = connection.query("CREATE TABLE vuelos (id int PRIMARY KEY)", None);

    assert_eq!(
        res,
        Ok(QueryResult::SchemaChange {
            change: "CREATED".to_string(),
            keyspace: "aerolineas".to_string(),
            table: "vuelos".to_string(),
        })
    );
    finish(connection, node);
}

#[test]
fn test_6_errores_del_servidor() {
    let (mut connection, node) = session(vec![
        error(0x2000, "line 1:0 no viable alternative"),
        error(0x1100, "ignorado"),
        error(0x7777, "ignorado"),
        result(ResultKind::Void, Vec::new()),
    ]);

    assert_eq!(
        connection.query("SELEC", None),
        Err(Error::ServerError(
            0x2000,
            "line 1:0 no viable alternative".to_string()
        ))
    );
    assert_eq!(
        connection.query("INSERT", None),
        Err(Error::ServerError(0x1100, "Write timeout".to_string()))
    );
    assert_eq!(
        connection.query("???", None),
        Err(Error::ServerError(0x7777, UNKNOWN_ERROR_MSG.to_string()))
    );

    // los errores del servidor no rompen la sesión
    assert!(connection.is_usable());
    assert_eq!(connection.query("TRUNCATE vuelos", None), Ok(QueryResult::Void));

    finish(connection, node);
}

#[test]
fn test_7_tipo_de_resultado_desconocido() {
    let frame = response(Opcode::Result, vec![0x0, 0x0, 0x0, 0x9]);
    let (mut connection, node) = session(vec![frame]);

    assert!(matches!(
        connection.query("SELECT * FROM vuelos", None),
        Err(Error::ProtocolError(_))
    ));
    finish(connection, node);
}
