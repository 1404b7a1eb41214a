use aws_sdk_dynamodb::Client as DynamoClient;
use customer_crud::core::handlers::{dispatch, ApiRequest, ApiResponse};
use customer_crud::utils::{logger, validation::Validate};
use customer_crud::{CustomerService, DynamoCustomerRepository, LambdaConfig};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

/// Per-invocation wiring: the repository and service are built fresh from the shared client.
async fn function_handler(
    event: LambdaEvent<ApiRequest>,
    client: DynamoClient,
    config: Arc<LambdaConfig>,
) -> Result<ApiResponse, Error> {
    let request_id = event.context.request_id.clone();
    tracing::info!(request_id = %request_id, "Handling customer request");

    let repository = DynamoCustomerRepository::from_config(client, config.as_ref());
    let service = CustomerService::new(Arc::new(repository));

    let response = dispatch(&service, config.operation, event.payload).await;

    tracing::info!(
        request_id = %request_id,
        status = response.status_code,
        "Customer request completed"
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;
    tracing::info!(
        table = %config.table_name,
        operation = ?config.operation,
        "Starting customer Lambda"
    );

    let client = config.dynamo_client().await;
    let config = Arc::new(config);

    run(service_fn(move |event: LambdaEvent<ApiRequest>| {
        function_handler(event, client.clone(), config.clone())
    }))
    .await
}
