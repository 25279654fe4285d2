use rust_decimal_macros::dec;
use salesdesk::api::{ClientForm, SalesdeskApi};
use salesdesk::auth::{self, Credentials};
use salesdesk::config::SalesdeskConfig;
use salesdesk::model::{Client, Collection, PaymentStatus, Product, Sale, Write};
use salesdesk::store::backend::StorageBackend;
use salesdesk::store::fs_backend::FsBackend;
use salesdesk::store::{RecordStore, Seed};
use salesdesk::valuation::SaleForm;
use tempfile::TempDir;

fn seed() -> Seed {
    Seed {
        products: vec![Product::new("Widget", dec!(10.00))],
    }
}

fn ana() -> Client {
    Client {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        phone: "555".into(),
        status: PaymentStatus::Pending,
    }
}

fn leftover_tmp_files(dir: &TempDir) -> Vec<String> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect()
}

#[test]
fn unknown_collection_loads_as_none() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    assert!(backend.load_collection(Collection::Sales).unwrap().is_none());
    assert!(backend.load_session().unwrap().is_none());
}

#[test]
fn open_seeds_files_on_first_run() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(FsBackend::new(dir.path().to_path_buf()), &seed()).unwrap();

    for name in ["clients.json", "products.json", "sales.json"] {
        assert!(dir.path().join(name).exists(), "{} missing", name);
    }
    assert_eq!(store.all::<Product>().len(), 1);
    assert!(store.all::<Client>().is_empty());
}

#[test]
fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut store =
            RecordStore::open(FsBackend::new(dir.path().to_path_buf()), &seed()).unwrap();
        store.save(Write::Create(ana())).unwrap();
    }

    let different_seed = Seed {
        products: vec![Product::new("Other", dec!(1))],
    };
    let store =
        RecordStore::open(FsBackend::new(dir.path().to_path_buf()), &different_seed).unwrap();
    assert_eq!(store.get::<Client>(1).unwrap().data, ana());
    // The catalog was already persisted, so the new seed is ignored.
    assert_eq!(store.all::<Product>()[0].data.name, "Widget");
}

#[test]
fn writes_leave_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let mut store = RecordStore::open(FsBackend::new(dir.path().to_path_buf()), &seed()).unwrap();
    for _ in 0..5 {
        store.save(Write::Create(ana())).unwrap();
    }
    store.remove::<Client>(2).unwrap();
    store.clear::<Sale>().unwrap();

    assert!(leftover_tmp_files(&dir).is_empty());
}

#[test]
fn failed_rename_removes_temp_file() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("clients.json");
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), "x").unwrap();

    let backend = FsBackend::new(dir.path().to_path_buf());
    let err = backend.save_collection(Collection::Clients, &[]);
    assert!(err.is_err());
    assert!(leftover_tmp_files(&dir).is_empty());
}

#[test]
fn persisted_records_are_flat_json() {
    let dir = TempDir::new().unwrap();
    let mut store = RecordStore::open(FsBackend::new(dir.path().to_path_buf()), &seed()).unwrap();
    store.save(Write::Create(ana())).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("clients.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], 1);
    assert_eq!(value[0]["name"], "Ana");
    assert_eq!(value[0]["status"], "Pending");
}

#[test]
fn legacy_status_labels_load() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("clients.json"),
        r#"[{"id": 4, "name": "Ana", "email": "a@x.com", "phone": "1", "status": "A pagar"},
            {"id": 9, "name": "Bia", "email": "b@x.com", "phone": "2", "status": "Pago"}]"#,
    )
    .unwrap();

    let store = RecordStore::open(FsBackend::new(dir.path().to_path_buf()), &seed()).unwrap();
    assert_eq!(store.get::<Client>(4).unwrap().data.status, PaymentStatus::Pending);
    assert_eq!(store.get::<Client>(9).unwrap().data.status, PaymentStatus::Paid);
}

#[test]
fn session_lives_in_the_data_dir() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    let creds = Credentials::new("admin", "admin");

    assert!(auth::login(&backend, &creds, "admin", "admin").unwrap());
    assert!(dir.path().join("session.json").exists());

    let again = FsBackend::new(dir.path().to_path_buf());
    assert!(auth::is_authenticated(&again).unwrap());

    auth::logout(&again).unwrap();
    assert!(!dir.path().join("session.json").exists());
    assert!(!auth::is_authenticated(&backend).unwrap());
}

#[test]
fn api_over_files() {
    let dir = TempDir::new().unwrap();
    let config = SalesdeskConfig {
        products: seed().products,
        ..Default::default()
    };
    let mut api = SalesdeskApi::open(
        FsBackend::new(dir.path().to_path_buf()),
        &config,
        dir.path().to_path_buf(),
    )
    .unwrap();
    api.login("admin", "admin").unwrap();
    api.create_client(ClientForm {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        phone: "555".into(),
        status: PaymentStatus::Pending,
    })
    .unwrap();
    api.create_sale(SaleForm {
        client_id: 1,
        product_id: 1,
        quantity: 3,
        payment_method: "Cash".into(),
        status: PaymentStatus::Paid,
    })
    .unwrap();
    drop(api);

    let api = SalesdeskApi::open(
        FsBackend::new(dir.path().to_path_buf()),
        &config,
        dir.path().to_path_buf(),
    )
    .unwrap();
    let dashboard = api.dashboard().unwrap().dashboard.unwrap();
    assert_eq!(dashboard.total_received, dec!(30.00));
    assert_eq!(dashboard.sale_count, 1);
}
