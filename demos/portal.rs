use medinet_http::{messages, MediNetClient, Role};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url = std::env::var("MEDINET_BASE_URL")?;
    let email = std::env::var("MEDINET_EMAIL")?;
    let password = std::env::var("MEDINET_PASSWORD")?;
    let csrf_token = std::env::var("MEDINET_CSRF_TOKEN")?;

    let client =
        MediNetClient::login(base_url, &email, &password, Role::Patient, csrf_token).await?;
    let me = client.credentials();

    match client.appointments().await {
        Ok(payload) => {
            for appointment in payload.appointments {
                println!(
                    "{} with {} on {} ({})",
                    appointment.patient_name,
                    appointment.doctor_name,
                    appointment.date,
                    appointment.status
                );
            }
            println!(
                "{}",
                messages::success_banner(
                    me.role,
                    me.name.as_deref(),
                    "appointments list retrieval"
                )
            );
        }
        Err(err) => {
            eprintln!(
                "{}",
                messages::error_banner(me.role, me.name.as_deref(), "appointments retrieval")
            );
            eprintln!("details: {err}");
        }
    }

    Ok(())
}
