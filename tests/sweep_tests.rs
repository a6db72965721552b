use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn clicks_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, creator_id, listing_id, clicked_at, window_days, status").unwrap();
    writeln!(file, "1, 10, 100, 2024-04-01T12:00:00Z, 7, active").unwrap();
    writeln!(file, "2, 11, 100, 2024-04-01T12:00:00Z, 30, active").unwrap();
    writeln!(file, "3, 12, 101, 2024-03-01T12:00:00Z, 7, converted").unwrap();
    writeln!(file, "4, 13, 101, 2024-03-01T12:00:00Z, 7, active").unwrap();
    file
}

fn offers_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "id, host_id, creator_id, percent_rate, flat_amount, max_payout, created_at, expires_at, status"
    )
    .unwrap();
    writeln!(file, "1, 20, 10, 0.10, , , 2024-04-01T00:00:00Z, 2024-04-05T00:00:00Z, pending").unwrap();
    writeln!(file, "2, 20, 11, , 75, , 2024-04-01T00:00:00Z, 2024-04-30T00:00:00Z, pending").unwrap();
    writeln!(file, "3, 21, 12, 0.20, , 100, 2024-03-01T00:00:00Z, 2024-03-05T00:00:00Z, accepted").unwrap();
    file
}

#[test]
fn test_sweep_expires_closed_windows() {
    let file = clicks_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("sweep")
        .arg(file.path())
        .arg("--now")
        .arg("2024-04-08T12:00:01Z");

    // Click 1 closed one second ago, click 4 long ago; 2 is open, 3 already converted.
    cmd.assert().success().stdout(predicate::str::diff(
        "kind,id,status\nclick,1,expired\nclick,4,expired\n",
    ));
}

#[test]
fn test_sweep_window_end_is_inclusive() {
    let file = clicks_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("sweep")
        .arg(file.path())
        .arg("--now")
        .arg("2024-04-08T12:00:00Z");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("kind,id,status\nclick,4,expired\n"));
}

#[test]
fn test_sweep_includes_expired_offers() {
    let clicks = clicks_file();
    let offers = offers_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("sweep")
        .arg(clicks.path())
        .arg("--offers")
        .arg(offers.path())
        .arg("--now")
        .arg("2024-04-08T12:00:01Z");

    // Offer 2 is still open and offer 3 was accepted before its deadline.
    cmd.assert().success().stdout(predicate::str::diff(
        "kind,id,status\nclick,1,expired\nclick,4,expired\noffer,1,expired\n",
    ));
}

#[test]
fn test_accept_open_offer() {
    let offers = offers_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("accept-offer")
        .arg(offers.path())
        .args(["--offer", "2", "--now", "2024-04-08T12:00:00Z"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"id\":2"))
        .stdout(predicate::str::contains("\"status\":\"accepted\""));
}

#[test]
fn test_accept_offer_past_deadline() {
    let offers = offers_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("accept-offer")
        .arg(offers.path())
        .args(["--offer", "1", "--now", "2024-04-08T12:00:00Z"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Offer 1 has expired"));
}

#[test]
fn test_accept_offer_already_accepted() {
    let offers = offers_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("accept-offer")
        .arg(offers.path())
        .args(["--offer", "3", "--now", "2024-03-02T00:00:00Z"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("offer is accepted"));
}

#[test]
fn test_attribute_booking_flow() {
    let file = clicks_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("attribute")
        .arg(file.path())
        .args(["--click", "2", "--booking", "77", "--amount", "5000"])
        .args(["--percent-rate", "0.20", "--max-payout", "200"])
        .args(["--now", "2024-04-15T09:00:00Z"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"clickId\":2"))
        .stdout(predicate::str::contains("\"creatorId\":11"))
        .stdout(predicate::str::contains("\"bookingId\":77"))
        .stdout(predicate::str::contains("\"creatorPayout\":170.00"))
        .stdout(predicate::str::contains("\"hostTotal\":230.00"));
}

#[test]
fn test_attribute_negative_amount_passes_through() {
    let file = clicks_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("attribute")
        .arg(file.path())
        .args(["--click", "2", "--booking", "78", "--amount", "-100"])
        .args(["--percent-rate", "0.10"])
        .args(["--now", "2024-04-15T09:00:00Z"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"creatorPayout\":-8.50"))
        .stdout(predicate::str::contains("\"platformFeeHost\":-1.50"))
        .stdout(predicate::str::contains("\"hostTotal\":-11.50"));
}

#[test]
fn test_attribute_rejects_closed_window() {
    let file = clicks_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("attribute")
        .arg(file.path())
        .args(["--click", "1", "--booking", "77", "--amount", "100"])
        .args(["--flat-amount", "20"])
        .args(["--now", "2024-05-01T00:00:00Z"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not attributable"));
}

#[test]
fn test_attribute_rejects_converted_click() {
    let file = clicks_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("attribute")
        .arg(file.path())
        .args(["--click", "3", "--booking", "1", "--amount", "100"])
        .args(["--now", "2024-03-02T00:00:00Z"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("click is converted"));
}

#[test]
fn test_attribute_unknown_click() {
    let file = clicks_file();

    let mut cmd = Command::new(cargo_bin!("collabpay"));
    cmd.arg("attribute")
        .arg(file.path())
        .args(["--click", "99", "--booking", "1", "--amount", "100"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Click 99 not found"));
}
