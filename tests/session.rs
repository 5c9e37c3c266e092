//! Módulo para tests de inicio de sesión contra un nodo.

mod common;

use std::fs::read_dir;

use client::{
    config::ClientConfig,
    connection::{Connection, SESSION_LOG_NAME},
};
use common::{dead_host, error, ready, response, result, string, FakeNode};
use protocol::{
    errors::error::Error,
    headers::opcode::Opcode,
    messages::{requests::startup::Startup, responses::result_kinds::ResultKind},
    traits::Byteable,
};
use tempfile::TempDir;

fn config_for(hosts: &[String]) -> ClientConfig {
    let mut config = ClientConfig {
        hosts: hosts.to_vec(),
        ..Default::default()
    };
    config.connect_timeout_secs = 1;
    config.stream_timeout_secs = 2;
    config
}

#[test]
fn test_1_conexion_y_startup() {
    let node = FakeNode::start(vec![ready()]);
    let config = config_for(&[node.host()]);

    let connection = Connection::connect(&config);
    assert!(connection.is_ok());
    drop(connection);

    let received = node.received();
    assert_eq!(received.len(), 1);
    let (opcode, body) = &received[0];
    assert_eq!(vec![*opcode], Opcode::Startup.as_bytes());
    assert_eq!(Ok(body.clone()), Startup::new("3.0.0").encode());
}

#[test]
fn test_2_lista_de_hosts_vacia() {
    let config = config_for(&[]);

    assert!(matches!(
        Connection::connect(&config),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_3_host_con_puerto_invalido() {
    let config = config_for(&["127.0.0.1:puerto".to_string()]);

    assert!(matches!(
        Connection::connect(&config),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_4_ningun_host_disponible() {
    let config = config_for(&[dead_host(), dead_host()]);

    assert!(matches!(
        Connection::connect(&config),
        Err(Error::ConnectionError(_))
    ));
}

#[test]
fn test_5_se_salta_los_hosts_caidos() {
    let node = FakeNode::start(vec![ready()]);
    let dead = dead_host();
    let config = config_for(&[dead.clone(), node.host(), dead]);

    // sin importar el orden en que se prueben
    let connection = Connection::connect(&config);
    assert!(connection.is_ok());
    drop(connection);
    assert_eq!(node.received().len(), 1);
}

#[test]
fn test_6_pide_autenticacion() {
    let authenticate = || response(Opcode::Authenticate, string("PasswordAuthenticator"));

    let node = FakeNode::start(vec![authenticate()]);
    let res = Connection::connect(&config_for(&[node.host()]));
    assert!(matches!(res, Err(Error::InvalidArgument(_))));
    drop(res);
    node.received();

    let node = FakeNode::start(vec![authenticate()]);
    let config = ClientConfig::from_json(&format!(
        r#"{{"hosts": ["{}"], "credentials": {{"username": "u", "password": "p"}}}}"#,
        node.host()
    ));
    assert!(config.is_ok());
    if let Ok(config) = config {
        let res = Connection::connect(&config);
        assert!(matches!(res, Err(Error::UnsupportedFeature(_))));
    }
    node.received();
}

#[test]
fn test_7_error_del_servidor_en_el_startup() {
    let node = FakeNode::start(vec![error(0x000A, "versión no soportada")]);

    let res = Connection::connect(&config_for(&[node.host()]));

    assert!(matches!(&res, Err(Error::ServerError(0x000A, _))));
    drop(res);
    node.received();
}

#[test]
fn test_8_keyspace_inicial() {
    let node = FakeNode::start(vec![
        ready(),
        result(ResultKind::SetKeyspace, string("vuelos")),
    ]);
    let mut config = config_for(&[node.host()]);
    config.keyspace = Some("vuelos".to_string());

    let connection = Connection::connect(&config);
    assert!(matches!(&connection, Ok(c) if c.keyspace() == Some("vuelos")));
    drop(connection);

    let received = node.received();
    assert_eq!(received.len(), 2);
    assert_eq!(vec![received[1].0], Opcode::Query.as_bytes());
}

#[test]
fn test_9_keyspace_inicial_invalido() {
    let node = FakeNode::start(vec![ready()]);
    let mut config = config_for(&[node.host()]);
    config.keyspace = Some("mal nombre".to_string());

    let res = Connection::connect(&config);
    assert!(matches!(res, Err(Error::InvalidArgument(_))));
    drop(res);

    // el USE nunca llegó al nodo
    assert_eq!(node.received().len(), 1);
}

#[test]
fn test_10_options() {
    let mut supported = vec![0x0, 0x2];
    supported.extend(string("COMPRESSION"));
    supported.extend([0x0, 0x0]);
    supported.extend(string("CQL_VERSION"));
    supported.extend([0x0, 0x1]);
    supported.extend(string("3.0.0"));
    let node = FakeNode::start(vec![ready(), response(Opcode::Supported, supported)]);

    let connection = Connection::connect(&config_for(&[node.host()]));
    assert!(connection.is_ok());
    if let Ok(mut connection) = connection {
        let options = connection.options();
        assert!(options.is_ok());
        if let Ok(options) = options {
            assert_eq!(options.get("CQL_VERSION"), Some(&vec!["3.0.0".to_string()]));
            assert_eq!(options.get("COMPRESSION"), Some(&Vec::new()));
        }
    }
    node.received();
}

#[test]
fn test_11_timeout_de_lectura() {
    let node = FakeNode::start(vec![ready()]);
    let mut config = config_for(&[node.host()]);
    config.stream_timeout_secs = 1;

    let connection = Connection::connect(&config);
    assert!(connection.is_ok());
    if let Ok(mut connection) = connection {
        assert!(matches!(
            connection.query("SELECT * FROM vuelos", None),
            Err(Error::ReadTimeout(_))
        ));
        assert!(!connection.is_usable());
        assert!(matches!(
            connection.query("SELECT * FROM vuelos", None),
            Err(Error::ProtocolError(_))
        ));
    }
    node.received();
}

#[test]
fn test_12_loguea_a_archivo() {
    let dir = TempDir::new();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let node = FakeNode::start(vec![ready()]);
        let mut config = config_for(&[node.host()]);
        config.log_dir = Some(dir.path().display().to_string());
        config.log_level = "TRACE".to_string();

        let connection = Connection::connect(&config);
        assert!(connection.is_ok());
        drop(connection);
        node.received();

        let files: Vec<_> = read_dir(dir.path())
            .map(|entries| entries.flatten().map(|e| e.path()).collect())
            .unwrap_or_default();
        assert_eq!(files.len(), 1);
        let content = std::fs::read_to_string(&files[0]).unwrap_or_default();
        assert!(content.contains("STARTUP"));
        assert!(content.contains("READY"));
    }
}

#[test]
fn test_13_un_solo_log_para_todos_los_hosts() {
    let dir = TempDir::new();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let hosts = [dead_host(), dead_host()];
        let mut config = config_for(&hosts);
        config.log_dir = Some(dir.path().display().to_string());

        assert!(matches!(
            Connection::connect(&config),
            Err(Error::ConnectionError(_))
        ));

        let path = dir.path().join(format!("client_{}.log", SESSION_LOG_NAME));
        let content = std::fs::read_to_string(path).unwrap_or_default();
        for host in &hosts {
            assert!(content.contains(host.as_str()), "falta {} en el log", host);
        }
    }
}

#[test]
fn test_14_configuracion_de_log_invalida_no_prueba_hosts() {
    let dir = TempDir::new();
    assert!(dir.is_ok());
    if let Ok(dir) = dir {
        let mut config = config_for(&[dead_host(), dead_host()]);
        config.log_dir = Some(dir.path().display().to_string());
        config.log_level = "ruidoso".to_string();

        assert!(matches!(
            Connection::connect(&config),
            Err(Error::InvalidArgument(_))
        ));
    }
}
