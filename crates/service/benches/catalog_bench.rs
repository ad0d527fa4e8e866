use criterion::{criterion_group, criterion_main, Criterion};

use models::Role;
use service::storage::{seed, EntityStore};
use service::SessionManager;

fn populated_store(users: usize) -> EntityStore {
    let mut store = seed::demo_store().unwrap();
    let team = store.list_teams()[0].id;
    for i in 0..users {
        store.create_user(&format!("bench-user-{i}"), Role::User, Some(team)).unwrap();
    }
    store
}

fn bench_login(c: &mut Criterion) {
    let store = populated_store(2_000);
    let mut session = SessionManager::new();

    c.bench_function("login_by_name_2k_users", |b| {
        b.iter(|| {
            session.login(&store, "BENCH-USER-1999").unwrap();
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let store = populated_store(0);

    c.bench_function("service_details_join", |b| {
        b.iter(|| {
            let details = store.list_service_details();
            assert_eq!(details.len(), 5);
        });
    });
    c.bench_function("search_services", |b| {
        b.iter(|| store.search_services("api").len());
    });
}

criterion_group!(benches, bench_login, bench_search);
criterion_main!(benches);
