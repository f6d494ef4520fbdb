use crate::cli::ShowArgs;
use crate::context::CliContext;
use crate::output;
use catalog_domain::{CatalogItem, Character, Comic, Event, ItemKind};

pub async fn handle(ctx: &CliContext, args: ShowArgs) -> anyhow::Result<()> {
    match ItemKind::from(args.kind) {
        ItemKind::Character => show::<Character>(ctx, args.id).await,
        ItemKind::Comic => show::<Comic>(ctx, args.id).await,
        ItemKind::Event => show::<Event>(ctx, args.id).await,
    }
}

async fn show<T: CatalogItem>(ctx: &CliContext, id: u64) -> anyhow::Result<()> {
    let item: T = ctx.client()?.fetch_detail(id).await?;
    output::output_success(&item)
}
