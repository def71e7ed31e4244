use crate::context::AppContext;
use crate::error::AppResult;
use crate::server;

#[derive(Debug, Clone)]
pub struct ServeCommandArgs {
    pub port: Option<u16>,
}

pub async fn run(ctx: AppContext, args: ServeCommandArgs) -> AppResult<()> {
    let port = args.port.unwrap_or(ctx.config.port);
    server::serve(ctx, port).await
}
