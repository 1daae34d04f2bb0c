use std::path::PathBuf;

use meddist::api::ApiClient;
use meddist::config::{Config, DEFAULT_CONFIG_FILE, Overrides};
use meddist::forms::{CategoryForm, ChannelForm, LocationForm, LoginForm, ProductForm};
use meddist::screens::{
    CategoriesScreen, ChannelsScreen, LocationsScreen, LoginScreen, ProductsScreen,
};
use meddist::telemetry::init_tracing;
use meddist::types::FormMode;
use meddist::{AppContext, Result};
use secrecy::ExposeSecret;
use tracing::{info, warn};

use super::cli::{
    CategoryCommand, CategoryFields, ChannelCommand, ChannelFields, Cli, LocationCommand,
    LocationFields, LoginArgs, ProductCommand, ProductFields, Resource,
};
use super::render;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let (config_path, required) = match cli.config {
        Some(path) => (path, true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let config = Config::from_env_and_file(
        &config_path,
        required,
        Overrides {
            api_url: cli.api_url,
            token: cli.token,
            login_path: cli.login_path,
        },
    )?;
    info!(
        api = %config.api_url,
        authenticated = config.token.is_some(),
        "configuration loaded"
    );

    let mut api = ApiClient::from_config(&config)?;
    let ctx = AppContext::new();

    let outcome = match cli.resource {
        Resource::Login(args) => login(&mut api, &ctx, args).await,
        Resource::Products { command } => products(&api, &ctx, command).await,
        Resource::Categories { command } => categories(&api, &ctx, command).await,
        Resource::Channels { command } => channels(&api, &ctx, command).await,
        Resource::Locations { command } => locations(&api, &ctx, command).await,
    };
    render::toasts(&ctx.toasts.snapshot());
    outcome
}

fn assign(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

async fn login(api: &mut ApiClient, ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let form = LoginForm {
        username: args.username,
        password: args.password,
        remember_me: args.remember_me,
    };
    let token = LoginScreen::new(api, ctx).submit(&form).await?;
    println!("{}", token.expose_secret());
    Ok(())
}

async fn products(api: &ApiClient, ctx: &AppContext, command: ProductCommand) -> Result<()> {
    let mut screen = ProductsScreen::new(api, ctx);
    match command {
        ProductCommand::List { page, category } => {
            screen.set_search(page.search);
            screen.set_category(category);
            screen.load(page.page).await?;
            render::products(screen.products(), screen.pagination());
        }
        ProductCommand::Show { id } => {
            let product = screen.fetch(&id).await?;
            render::product(&product);
        }
        ProductCommand::Create { fields } => {
            let mut form = ProductForm::default();
            apply_product(&mut form, fields);
            check_categories(&screen, &form).await;
            let saved = screen.save(&form, &FormMode::Create).await?;
            render::product(&saved);
        }
        ProductCommand::Update { id, fields } => {
            let mut form = screen.open(&id).await?;
            apply_product(&mut form, fields);
            check_categories(&screen, &form).await;
            let saved = screen.save(&form, &FormMode::Edit(id)).await?;
            render::product(&saved);
        }
    }
    Ok(())
}

fn apply_product(form: &mut ProductForm, fields: ProductFields) {
    assign(&mut form.name, fields.name);
    assign(&mut form.description, fields.description);
    assign(&mut form.brand, fields.brand);
    assign(&mut form.price, fields.price);
    if !fields.categories.is_empty() {
        form.categories = fields.categories;
    }

    let mut removals = fields.remove_images;
    removals.sort_unstable();
    removals.dedup();
    for index in removals.into_iter().rev() {
        if form.images.remove(index).is_none() {
            warn!(index, "no image at this position");
        }
    }
    form.images.add_files(fields.images);

    match fields.primary {
        Some(index) => {
            if !form.images.set_primary(index) {
                warn!(index, images = form.images.len(), "primary image index out of range");
            }
        }
        None if form.images.primary_count() == 0 => {
            form.images.set_primary(0);
        }
        None => {}
    }
}

/// Warns about ids the category picker would not offer.
async fn check_categories(screen: &ProductsScreen<'_>, form: &ProductForm) {
    let options = screen.category_options().await;
    if options.is_empty() {
        return;
    }
    for id in &form.categories {
        if !options.iter().any(|category| &category.id == id) {
            warn!(category = %id, "category is not among the listed options");
        }
    }
}

async fn categories(api: &ApiClient, ctx: &AppContext, command: CategoryCommand) -> Result<()> {
    let mut screen = CategoriesScreen::new(api, ctx);
    match command {
        CategoryCommand::List { page } => {
            screen.set_search(page.search);
            screen.load(page.page).await?;
            render::categories(screen.categories(), screen.pagination());
        }
        CategoryCommand::Show { id } => {
            let category = screen.fetch(&id).await?;
            render::category(&category);
        }
        CategoryCommand::Create { fields } => {
            let mut form = CategoryForm::default();
            apply_category(&mut form, fields);
            let saved = screen.save(&form, &FormMode::Create).await?;
            render::category(&saved);
        }
        CategoryCommand::Update { id, fields } => {
            let mut form = screen.open(&id).await?;
            apply_category(&mut form, fields);
            let saved = screen.save(&form, &FormMode::Edit(id)).await?;
            render::category(&saved);
        }
    }
    Ok(())
}

fn apply_category(form: &mut CategoryForm, fields: CategoryFields) {
    assign(&mut form.name, fields.name);
    assign(&mut form.description, fields.description);
    assign(&mut form.parent_id, fields.parent);
}

async fn channels(api: &ApiClient, ctx: &AppContext, command: ChannelCommand) -> Result<()> {
    let mut screen = ChannelsScreen::new(api, ctx);
    match command {
        ChannelCommand::List => {
            screen.load().await?;
            render::channels(screen.channels());
        }
        ChannelCommand::Show { id } => {
            let channel = screen.fetch(&id).await?;
            render::channel(&channel);
        }
        ChannelCommand::Create { fields } => {
            let mut form = ChannelForm::default();
            apply_channel(&mut form, fields);
            let saved = screen.save(&form, &FormMode::Create).await?;
            render::channel(&saved);
        }
        ChannelCommand::Update { id, fields } => {
            let mut form = screen.open(&id).await?;
            apply_channel(&mut form, fields);
            let saved = screen.save(&form, &FormMode::Edit(id)).await?;
            render::channel(&saved);
        }
    }
    Ok(())
}

fn apply_channel(form: &mut ChannelForm, fields: ChannelFields) {
    assign(&mut form.name, fields.name);
    assign(&mut form.description, fields.description);
}

async fn locations(api: &ApiClient, ctx: &AppContext, command: LocationCommand) -> Result<()> {
    let mut screen = LocationsScreen::new(api, ctx);
    match command {
        LocationCommand::List => {
            screen.load().await?;
            render::locations(screen.locations());
        }
        LocationCommand::Show { id } => {
            let location = screen.fetch(&id).await?;
            render::location(&location);
        }
        LocationCommand::Create { fields } => {
            let mut form = LocationForm::default();
            apply_location(&mut form, fields);
            let saved = screen.save(&form, &FormMode::Create).await?;
            render::location(&saved);
        }
        LocationCommand::Update { id, fields } => {
            let mut form = screen.open(&id).await?;
            apply_location(&mut form, fields);
            let saved = screen.save(&form, &FormMode::Edit(id)).await?;
            render::location(&saved);
        }
    }
    Ok(())
}

fn apply_location(form: &mut LocationForm, fields: LocationFields) {
    assign(&mut form.name, fields.name);
    if fields.capacity.is_some() {
        form.capacity = fields.capacity;
    }
    let address = &mut form.address;
    assign(&mut address.cep, fields.cep);
    assign(&mut address.address, fields.address);
    assign(&mut address.number, fields.number);
    assign(&mut address.complement, fields.complement);
    assign(&mut address.neighborhood, fields.neighborhood);
    assign(&mut address.city, fields.city);
    assign(&mut address.state, fields.state);
}
