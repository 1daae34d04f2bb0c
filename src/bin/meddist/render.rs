use meddist::api::{Category, Channel, Location, Product};
use meddist::forms::price::format_brl;
use meddist::forms::state_name;
use meddist::screens::Pagination;
use meddist::toast::Toast;
use meddist::types::Severity;
use meddist::validation::ValidationErrors;

const DASH: &str = "-";

pub fn toasts(toasts: &[Toast]) {
    for toast in toasts {
        let label = match toast.severity() {
            Severity::Success => "ok",
            Severity::Error => "erro",
            Severity::Info => "info",
            Severity::Warning => "aviso",
        };
        eprintln!(
            "[{label}] {} ({})",
            toast.message(),
            toast.created_at().format("%H:%M:%S")
        );
    }
}

pub fn validation(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
}

fn price(value: f64) -> String {
    let formatted = format_brl(value);
    if formatted.is_empty() {
        "R$ 0,00".to_string()
    } else {
        format!("R$ {formatted}")
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(DASH)
}

fn footer(pagination: Pagination) {
    if pagination.total() > 0 {
        println!("{}", pagination.label());
    }
}

pub fn products(products: &[Product], pagination: Pagination) {
    if products.is_empty() {
        println!("Nenhum produto encontrado.");
    }
    for product in products {
        let categories: Vec<&str> = product.categories.iter().map(|c| c.name.as_str()).collect();
        println!(
            "{:<26} {:<32} {:<18} {:>14}  {}",
            product.id,
            product.name,
            product.brand,
            price(product.price),
            categories.join(", ")
        );
    }
    footer(pagination);
}

pub fn product(product: &Product) {
    println!("id:          {}", product.id);
    println!("nome:        {}", product.name);
    println!("marca:       {}", product.brand);
    println!("descrição:   {}", or_dash(product.description.as_deref()));
    println!("preço:       {}", price(product.price));
    if let Some(quantity) = product.quantity {
        println!("estoque:     {quantity}");
    }
    let categories: Vec<&str> = product.categories.iter().map(|c| c.name.as_str()).collect();
    println!("categorias:  {}", categories.join(", "));
    for (index, image) in product.images.iter().enumerate() {
        let marker = if image.is_primary { "*" } else { " " };
        println!("imagem {index}{marker}:   {}", image.url);
    }
}

pub fn categories(categories: &[Category], pagination: Pagination) {
    if categories.is_empty() {
        println!("Nenhuma categoria encontrada.");
    }
    for category in categories {
        let parent = category.parent.as_ref().map(|p| p.name.as_str());
        println!(
            "{:<26} {:<32} {}",
            category.id,
            category.name,
            or_dash(parent)
        );
    }
    footer(pagination);
}

pub fn category(category: &Category) {
    println!("id:          {}", category.id);
    println!("nome:        {}", category.name);
    println!("descrição:   {}", or_dash(category.description.as_deref()));
    let parent = category.parent.as_ref().map(|p| p.name.as_str());
    println!("pai:         {}", or_dash(parent));
}

pub fn channels(channels: &[Channel]) {
    if channels.is_empty() {
        println!("Nenhum canal encontrado.");
    }
    for channel in channels {
        println!(
            "{:<26} {:<32} {}",
            channel.id,
            channel.name,
            or_dash(channel.description.as_deref())
        );
    }
}

pub fn channel(channel: &Channel) {
    println!("id:          {}", channel.id);
    println!("nome:        {}", channel.name);
    println!("descrição:   {}", or_dash(channel.description.as_deref()));
}

pub fn locations(locations: &[Location]) {
    if locations.is_empty() {
        println!("Nenhuma localização encontrada.");
    }
    for location in locations {
        let address = location.address.as_ref().map(|a| a.summary());
        println!(
            "{:<26} {:<32} {:>8}  {}",
            location.id,
            location.name,
            location.capacity,
            or_dash(address.as_deref())
        );
    }
}

pub fn location(location: &Location) {
    println!("id:          {}", location.id);
    println!("nome:        {}", location.name);
    println!("capacidade:  {}", location.capacity);
    if let Some(address) = &location.address {
        println!("cep:         {}", address.cep);
        println!("endereço:    {}, {}", address.address, address.number);
        println!("complemento: {}", or_dash(address.complement.as_deref()));
        println!("bairro:      {}", address.neighborhood);
        println!("cidade:      {}", address.city);
        println!(
            "estado:      {} ({})",
            state_name(&address.state).unwrap_or(DASH),
            address.state
        );
    }
}
