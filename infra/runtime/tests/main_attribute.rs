use hbnb_runtime::Result;

#[hbnb_runtime::main(workers = 2, thread_name = "hbnb-test")]
async fn boot() -> Result<(usize, Option<String>)> {
    let workers = tokio::runtime::Handle::current().metrics().num_workers();
    let worker_name =
        tokio::spawn(async { std::thread::current().name().map(str::to_owned) }).await?;
    Ok((workers, worker_name))
}

#[hbnb_runtime::main]
async fn failing() -> Result<()> {
    anyhow::bail!("startup failed")
}

#[test]
fn attribute_runs_the_body_on_the_configured_pool() -> Result<()> {
    let (workers, worker_name) = boot()?;
    assert_eq!(workers, 2);
    assert_eq!(worker_name.as_deref(), Some("hbnb-test"));
    Ok(())
}

#[test]
fn errors_of_the_body_are_returned() {
    let err = failing().unwrap_err();
    assert_eq!(err.to_string(), "startup failed");
}
