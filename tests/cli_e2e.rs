use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "currency": "$", "products": [{ "name": "Widget", "price": "10.00" }] }"#,
    )
    .unwrap();
    dir
}

fn salesdesk(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("salesdesk").unwrap();
    cmd.env("SALESDESK_DATA", dir.path())
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn login(dir: &TempDir) {
    salesdesk(dir)
        .args(["login", "admin", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as admin"));
}

fn add_client(dir: &TempDir, name: &str) {
    salesdesk(dir)
        .args([
            "client",
            "add",
            "--name",
            name,
            "--email",
            &format!("{}@example.com", name.to_lowercase()),
            "--phone",
            "555-0100",
        ])
        .assert()
        .success();
}

fn add_sale(dir: &TempDir, client: &str, quantity: &str, status: &str) {
    salesdesk(dir)
        .args([
            "sale",
            "add",
            "--client",
            client,
            "--product",
            "1",
            "--quantity",
            quantity,
            "--payment",
            "Cash",
            "--status",
            status,
        ])
        .assert()
        .success();
}

#[test]
fn data_commands_require_login() {
    let dir = data_dir();
    salesdesk(&dir)
        .args(["client", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
    salesdesk(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn wrong_password_is_rejected() {
    let dir = data_dir();
    salesdesk(&dir)
        .args(["login", "admin", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
    salesdesk(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_locks_data_again() {
    let dir = data_dir();
    login(&dir);
    salesdesk(&dir).arg("logout").assert().success();
    salesdesk(&dir)
        .args(["sale", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn sale_total_is_price_times_quantity() {
    let dir = data_dir();
    login(&dir);
    add_client(&dir, "Ana");
    add_sale(&dir, "1", "3", "paid");

    salesdesk(&dir)
        .args(["sale", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("$ 30.00"));

    salesdesk(&dir)
        .args(["sale", "edit", "1", "--quantity", "5"])
        .assert()
        .success();
    salesdesk(&dir)
        .args(["sale", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ 50.00"));
}

#[test]
fn invalid_sale_input_is_refused() {
    let dir = data_dir();
    login(&dir);
    add_client(&dir, "Ana");

    for quantity in ["0", "-2", "abc"] {
        salesdesk(&dir)
            .args([
                "sale", "add", "--client", "1", "--product", "1", "--quantity", quantity,
                "--payment", "Cash",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Quantity"));
    }
    salesdesk(&dir)
        .args([
            "sale", "add", "--client", "1", "--product", "99", "--quantity", "1", "--payment",
            "Cash",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found"));

    salesdesk(&dir)
        .args(["sale", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sales yet."));
}

#[test]
fn dashboard_is_the_default_view() {
    let dir = data_dir();
    login(&dir);
    add_client(&dir, "Ana");
    add_sale(&dir, "1", "3", "paid");
    add_sale(&dir, "1", "2", "pending");

    salesdesk(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Received    $ 30.00"))
        .stdout(predicate::str::contains("Receivable  $ 20.00"))
        .stdout(predicate::str::contains("Sales       2"))
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("$ 50.00"));
}

#[test]
fn deleted_client_leaves_sale_with_placeholder() {
    let dir = data_dir();
    login(&dir);
    add_client(&dir, "Ana");
    add_sale(&dir, "1", "3", "paid");

    salesdesk(&dir)
        .args(["client", "delete", "1", "--yes"])
        .assert()
        .success();

    salesdesk(&dir)
        .args(["sale", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Client not found"))
        .stdout(predicate::str::contains("$ 30.00"));
}

#[test]
fn delete_without_yes_asks_first() {
    let dir = data_dir();
    login(&dir);
    add_client(&dir, "Ana");

    salesdesk(&dir)
        .args(["client", "delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));
    salesdesk(&dir)
        .args(["client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana"));

    salesdesk(&dir)
        .args(["client", "delete", "1"])
        .write_stdin("Y\n")
        .assert()
        .success();
    salesdesk(&dir)
        .args(["client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clients yet."));
}

#[test]
fn clear_sales_zeroes_the_dashboard() {
    let dir = data_dir();
    login(&dir);
    add_client(&dir, "Ana");
    add_sale(&dir, "1", "3", "paid");
    add_sale(&dir, "1", "1", "pending");

    salesdesk(&dir)
        .args(["sale", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 sale(s)"));

    salesdesk(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Received    $ 0.00"))
        .stdout(predicate::str::contains("Receivable  $ 0.00"))
        .stdout(predicate::str::contains("No sales yet"));
}

#[test]
fn report_can_be_written_to_a_file() {
    let dir = data_dir();
    login(&dir);
    add_client(&dir, "Ana");
    add_client(&dir, "Bia");
    add_sale(&dir, "1", "3", "paid");
    add_sale(&dir, "2", "2", "pending");
    salesdesk(&dir)
        .args(["client", "delete", "2", "-y"])
        .assert()
        .success();

    let out = dir.path().join("report.txt");
    salesdesk(&dir)
        .args(["report", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("Sales Report"));
    assert!(text.contains("Ana"));
    assert!(text.contains("N/A"));
    assert!(text.contains("Total received    $ 30.00"));
    assert!(text.contains("Total receivable  $ 20.00"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn products_come_from_the_configured_catalog() {
    let dir = data_dir();
    login(&dir);
    salesdesk(&dir)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("$ 10.00"));

    salesdesk(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded"));
}

#[test]
fn config_changes_currency() {
    let dir = data_dir();
    login(&dir);
    salesdesk(&dir)
        .args(["config", "currency", "EUR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("currency set to EUR"));
    salesdesk(&dir)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EUR 10.00"));
    salesdesk(&dir)
        .args(["config", "colour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown config key"));
}
