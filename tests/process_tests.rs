//! Process-level tests: exit codes for startup errors and signals.

#![cfg(unix)]

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

fn certinator() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_certinator"));
    cmd.env_remove("HOST_PORT")
        .env("OTEL_EXPORTER_OTLP_ENDPOINT", "http://127.0.0.1:1")
        .env("SHUTDOWN_GRACE_MS", "100")
        .env("RUST_LOG", "warn")
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn wait_for_exit(child: &mut Child, timeout: Duration) -> ExitStatus {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            panic!("process did not exit within {timeout:?}");
        }
        thread::sleep(Duration::from_millis(20));
    }
}

fn wait_until_listening(port: u16) {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let deadline = Instant::now() + Duration::from_secs(10);
    while TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_err() {
        assert!(Instant::now() < deadline, "server never started listening");
        thread::sleep(Duration::from_millis(20));
    }
}

fn exits_zero_on(signal: libc::c_int) {
    let port = free_port();
    let mut child = certinator()
        .env("HOST_PORT", port.to_string())
        .spawn()
        .unwrap();

    wait_until_listening(port);

    // SAFETY: signalling a child process we own.
    let rc = unsafe { libc::kill(child.id() as libc::pid_t, signal) };
    assert_eq!(rc, 0);

    let status = wait_for_exit(&mut child, Duration::from_secs(15));
    assert_eq!(status.code(), Some(0));
}

#[test]
fn test_missing_port_exits_nonzero() {
    let status = certinator().status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_invalid_port_exits_nonzero() {
    let status = certinator().env("HOST_PORT", "not-a-port").status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_out_of_range_port_exits_nonzero() {
    let status = certinator().env("HOST_PORT", "70000").status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_sigterm_exits_zero() {
    exits_zero_on(libc::SIGTERM);
}

#[test]
fn test_sigint_exits_zero() {
    exits_zero_on(libc::SIGINT);
}

#[test]
fn test_sigabrt_exits_zero() {
    exits_zero_on(libc::SIGABRT);
}
