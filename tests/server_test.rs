mod common;

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use pktlog::messaging::ReqSocket;
use pktlog::option::PktlogOption;
use pktlog::server::{PacketLogger, PktlogServer};
use pktlog::store::{Record, RecordStore};

fn test_opts(dir: &Path) -> PktlogOption {
    PktlogOption {
        listen_addr: "127.0.0.1".to_string(),
        rep_port: 0,
        http_port: 0,
        data_file: dir.join("received_data.json").to_string_lossy().into_owned(),
        index_file: dir.join("index.html").to_string_lossy().into_owned(),
        ..PktlogOption::default()
    }
}

#[test]
fn fresh_start_ping_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let svc = PktlogServer::new(test_opts(dir.path())).unwrap();
    let rep_addr = svc.rep_addr().unwrap();
    let web_addr = svc.web_addr().unwrap();

    // the log exists as soon as the server is up
    assert_eq!(fs::read_to_string(dir.path().join("received_data.json")).unwrap(), "[]");

    let stop = Arc::new(AtomicBool::new(false));
    let stop2 = stop.clone();
    let handle = thread::spawn(move || svc.bootstrap(stop2));

    let mut req = ReqSocket::connect(rep_addr).unwrap();
    assert_eq!(req.request_string("ping").unwrap(), "Hello from Server");

    let reply = common::http_get(web_addr, "/data");
    assert_eq!(reply.status, 200);
    let records: Vec<Record> = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].data, "ping");
    assert_eq!(records[0].packet_number, 1);

    stop.store(true, Ordering::SeqCst);
    handle.join().unwrap().unwrap();
}

#[test]
fn packet_numbers_follow_arrival_order() {
    let dir = tempfile::tempdir().unwrap();
    let svc = PktlogServer::new(test_opts(dir.path())).unwrap();
    let rep_addr = svc.rep_addr().unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let stop2 = stop.clone();
    let handle = thread::spawn(move || svc.bootstrap(stop2));

    let mut req = ReqSocket::connect(rep_addr).unwrap();
    for i in 0..5 {
        req.request_string(&format!("msg-{}", i)).unwrap();
    }

    stop.store(true, Ordering::SeqCst);
    handle.join().unwrap().unwrap();

    let records = RecordStore::new(dir.path().join("received_data.json")).load().unwrap();
    assert_eq!(records.len(), 5);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.packet_number, i as u64 + 1);
        assert_eq!(record.data, format!("msg-{}", i));
    }
}

#[test]
fn counter_restarts_but_log_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("received_data.json"));

    let mut first_run = PacketLogger::new(store.clone(), "ok");
    first_run.handle_packet(b"a").unwrap();
    first_run.handle_packet(b"b").unwrap();

    let mut second_run = PacketLogger::new(store.clone(), "ok");
    assert_eq!(second_run.handle_packet(b"c").unwrap(), "ok");

    let numbers: Vec<u64> = store.load().unwrap().iter().map(|r| r.packet_number).collect();
    assert_eq!(numbers, [1, 2, 1]);
}

#[test]
fn timestamp_has_second_precision() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("received_data.json"));
    let mut logger = PacketLogger::new(store.clone(), "ok");
    logger.handle_packet(b"x").unwrap();

    let record = &store.load().unwrap()[0];
    assert!(chrono::NaiveDateTime::parse_from_str(&record.timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[test]
fn corrupted_log_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let svc = PktlogServer::new(test_opts(dir.path())).unwrap();
    let rep_addr = svc.rep_addr().unwrap();
    fs::write(dir.path().join("received_data.json"), "not json").unwrap();

    let handle = thread::spawn(move || svc.bootstrap(Arc::new(AtomicBool::new(false))));

    // the request never gets a reply, so the client is left behind
    thread::spawn(move || {
        let mut req = ReqSocket::connect(rep_addr).unwrap();
        let _ = req.request_string("boom");
    });
    assert!(matches!(handle.join().unwrap(), Err(pktlog::Error::Json(_))));
}

#[test]
fn config_file_defaults_fill_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pktlog.json");
    fs::write(&path, r#"{ "repPort": 4444, "reply": "ack" }"#).unwrap();

    let opts = PktlogOption::load(&path).unwrap();
    assert_eq!(opts.rep_port, 4444);
    assert_eq!(opts.http_port, 8080);
    assert_eq!(opts.reply, "ack");
    assert_eq!(opts.data_file, "received_data.json");

    fs::write(&path, r#"{ "dataFile": "" }"#).unwrap();
    assert!(matches!(PktlogOption::load(&path), Err(pktlog::Error::Config(_))));
}
