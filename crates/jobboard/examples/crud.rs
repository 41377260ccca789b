//! Minimal tour: migrate, then CRUD a company and a job.
//!
//! Run with:
//!   DATABASE_URL=postgres://localhost/jobboard cargo run --example crud -p jobboard

use jobboard::models::{Company, Job, JobFilter, JobPatch, NewCompany, NewJob};
use jobboard::{DataResult, TracedClient, create_pool, migrate};

#[tokio::main]
async fn main() -> DataResult<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = create_pool(&database_url)?;
    migrate::run_pool(&pool).await?;
    let client = TracedClient::new(pool.get().await?);

    let company = Company::create(
        &client,
        NewCompany {
            handle: "acme".into(),
            name: "Acme Corp".into(),
            description: "makers of everything".into(),
            num_employees: Some(120),
            logo_url: None,
        },
    )
    .await?;
    println!("created company: {company:?}");

    let job = Job::create(
        &client,
        NewJob {
            title: "Engineer".into(),
            salary: Some(100_000),
            equity: None,
            company_handle: company.handle.clone(),
        },
    )
    .await?;
    println!("created job: {}", serde_json::to_string_pretty(&job).unwrap());

    let patch: JobPatch = serde_json::from_str(r#"{"salary": 120000}"#).unwrap();
    let updated = Job::update(&client, job.id, patch).await?;
    println!("after raise: salary = {:?}", updated.salary);

    let listings = Job::find_all(
        &client,
        &JobFilter {
            title: Some("engineer".into()),
            ..JobFilter::default()
        },
    )
    .await?;
    println!("{} matching listing(s)", listings.len());

    // Cascade removes the job as well.
    Company::remove(&client, &company.handle).await?;
    Ok(())
}
