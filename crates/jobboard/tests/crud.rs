//! End-to-end CRUD against a live Postgres database.
//!
//! Requires `DATABASE_URL`; the test is skipped when it is unset. All tables
//! are created in a throwaway schema so concurrent runs do not collide.

use jobboard::models::{
    Company, CompanyFilter, CompanyPatch, Job, JobFilter, JobPatch, NewCompany, NewJob,
};
use jobboard::{DataError, DataResult, GenericClient, TracedClient, create_pool, migrate};
use rust_decimal::Decimal;
use std::time::{SystemTime, UNIX_EPOCH};

fn new_company(handle: &str, name: &str) -> NewCompany {
    NewCompany {
        handle: handle.to_string(),
        name: name.to_string(),
        description: format!("{name} does things"),
        num_employees: Some(120),
        logo_url: None,
    }
}

#[tokio::test]
async fn companies_and_jobs_crud() -> DataResult<()> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping companies_and_jobs_crud");
            return Ok(());
        }
    };

    let pool = create_pool(&database_url)?;
    let mut client = pool.get().await?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before UNIX_EPOCH")
        .as_nanos();
    let schema = format!("jobboard_test_{}_{}", std::process::id(), nanos);
    client
        .execute(format!("CREATE SCHEMA {schema}").as_str(), &[])
        .await?;
    client
        .execute(format!("SET search_path TO {schema}").as_str(), &[])
        .await?;
    migrate::run(&mut client).await?;

    // A rolled-back transaction leaves nothing behind.
    {
        let tx = client.transaction().await?;
        Company::create(&tx, new_company("ghost", "Ghost Inc")).await?;
        tx.rollback().await?;
    }
    let missing = Company::get(&client, "ghost").await;
    assert!(missing.unwrap_err().is_not_found());

    let client = TracedClient::new(client);

    // ===== companies =====

    let acme = Company::create(&client, new_company("acme", "Acme Corp")).await?;
    assert_eq!(acme.handle, "acme");
    assert_eq!(acme.num_employees, Some(120));

    let dupe = Company::create(&client, new_company("acme", "Other Name")).await;
    assert!(dupe.unwrap_err().is_unique_violation());

    Company::create(&client, new_company("initech", "Initech")).await?;

    let filtered = Company::find_all(
        &client,
        &CompanyFilter {
            name: Some("acme".into()),
            ..CompanyFilter::default()
        },
    )
    .await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].handle, "acme");

    let bounded = Company::find_all(
        &client,
        &CompanyFilter {
            min_employees: Some(1000),
            ..CompanyFilter::default()
        },
    )
    .await?;
    assert!(bounded.is_empty());

    let inverted = Company::find_all(
        &client,
        &CompanyFilter {
            min_employees: Some(100),
            max_employees: Some(10),
            ..CompanyFilter::default()
        },
    )
    .await;
    assert!(matches!(inverted.unwrap_err(), DataError::Validation(_)));

    // Patch through the wire shape: rename + explicit null.
    let patch: CompanyPatch =
        serde_json::from_str(r#"{"numEmployees": 250, "logoUrl": null}"#).unwrap();
    let updated = Company::update(&client, "acme", patch).await?;
    assert_eq!(updated.num_employees, Some(250));
    assert_eq!(updated.logo_url, None);
    assert_eq!(updated.name, "Acme Corp");

    let err = Company::update(&client, "acme", CompanyPatch::default()).await;
    assert!(err.unwrap_err().is_empty_update());

    // ===== jobs =====

    let engineer = Job::create(
        &client,
        NewJob {
            title: "Engineer".into(),
            salary: Some(100_000),
            equity: Some(Decimal::new(1, 1)),
            company_handle: "acme".into(),
        },
    )
    .await?;
    assert_eq!(engineer.company_handle, "acme");
    assert_eq!(engineer.equity, Some(Decimal::new(1, 1)));

    let dupe = Job::create(
        &client,
        NewJob {
            title: "Engineer".into(),
            salary: None,
            equity: None,
            company_handle: "acme".into(),
        },
    )
    .await;
    assert!(dupe.unwrap_err().is_unique_violation());

    let orphan = Job::create(
        &client,
        NewJob {
            title: "Engineer".into(),
            salary: None,
            equity: None,
            company_handle: "nope".into(),
        },
    )
    .await;
    assert!(matches!(
        orphan.unwrap_err(),
        DataError::ForeignKeyViolation(_)
    ));

    Job::create(
        &client,
        NewJob {
            title: "Intern".into(),
            salary: Some(30_000),
            equity: None,
            company_handle: "initech".into(),
        },
    )
    .await?;

    let fetched = Job::get(&client, engineer.id).await?;
    assert_eq!(fetched, engineer);
    assert!(Job::get(&client, -1).await.unwrap_err().is_not_found());

    let all = Job::find_all(&client, &JobFilter::default()).await?;
    assert_eq!(all.len(), 2);
    // ORDER BY title
    assert_eq!(all[0].title, "Engineer");
    assert_eq!(all[1].title, "Intern");

    let well_paid = Job::find_all(
        &client,
        &JobFilter {
            min_salary: Some(50_000),
            ..JobFilter::default()
        },
    )
    .await?;
    assert_eq!(well_paid.len(), 1);
    assert_eq!(well_paid[0].title, "Engineer");

    let with_equity = Job::find_all(
        &client,
        &JobFilter {
            has_equity: Some(true),
            ..JobFilter::default()
        },
    )
    .await?;
    assert_eq!(with_equity.len(), 1);

    // Tri-state patch: change the title, clear the salary, leave equity.
    let patch: JobPatch =
        serde_json::from_str(r#"{"title": "Senior Engineer", "salary": null}"#).unwrap();
    let updated = Job::update(&client, engineer.id, patch).await?;
    assert_eq!(updated.title, "Senior Engineer");
    assert_eq!(updated.salary, None);
    assert_eq!(updated.equity, Some(Decimal::new(1, 1)));

    let err = Job::update(&client, engineer.id, JobPatch::default()).await;
    assert!(err.unwrap_err().is_empty_update());

    let err = Job::update(
        &client,
        -1,
        JobPatch {
            title: Some("anything".into()),
            ..JobPatch::default()
        },
    )
    .await;
    assert!(err.unwrap_err().is_not_found());

    let detail = Company::get_with_jobs(&client, "acme").await?;
    assert_eq!(detail.company.handle, "acme");
    assert_eq!(detail.jobs.len(), 1);
    assert_eq!(detail.jobs[0].title, "Senior Engineer");

    Job::remove(&client, engineer.id).await?;
    assert!(
        Job::remove(&client, engineer.id)
            .await
            .unwrap_err()
            .is_not_found()
    );

    // Removing a company cascades to its postings.
    Company::remove(&client, "initech").await?;
    let remaining = Job::find_all(&client, &JobFilter::default()).await?;
    assert!(remaining.is_empty());
    assert!(
        Company::remove(&client, "initech")
            .await
            .unwrap_err()
            .is_not_found()
    );

    client
        .execute(&format!("DROP SCHEMA {schema} CASCADE"), &[])
        .await?;
    Ok(())
}
