//! Server-rendered pages for the interactive UI.
//!
//! Plain escaped-string rendering: four pages sharing one layout. All
//! interpolated data goes through [`escape`].

use estoque_inventory::Product;

use crate::cookies::Flash;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem auto; max-width: 56rem; color: #222; }
header { display: flex; justify-content: space-between; align-items: baseline; }
nav a { margin-left: 1rem; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }
form.inline { display: inline; }
label { display: block; margin-top: 0.6rem; }
input, select { padding: 0.25rem; }
.flash { padding: 0.6rem 1rem; margin: 1rem 0; border-radius: 4px; }
.flash.success { background: #e2f5e5; border: 1px solid #3c9a4e; }
.flash.danger { background: #fbe4e4; border: 1px solid #c0392b; }
.flash.warning { background: #fdf3d8; border: 1px solid #c79a10; }
.flash.info { background: #e3edf8; border: 1px solid #3a6ea5; }";

/// Login page; also re-rendered inline on failed attempts.
pub fn login_page(flash: Option<&Flash>) -> String {
    let body = "\
<h2>Login</h2>
<form method=\"post\" action=\"/login\">
  <label>Usuário <input type=\"text\" name=\"usuario\" required></label>
  <label>Senha <input type=\"password\" name=\"senha\" required></label>
  <p><button type=\"submit\">Entrar</button></p>
</form>";
    layout("Login", flash, false, body)
}

/// Product list (the landing page).
pub fn index_page(products: &[Product], flash: Option<&Flash>) -> String {
    let mut body = String::from("<h2>Produtos</h2>\n");
    if products.is_empty() {
        body.push_str("<p>Nenhum produto cadastrado.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>ID</th><th>Nome</th><th>Categoria</th>\
             <th>Preço unitário</th><th>Quantidade</th><th></th></tr>\n",
        );
        for product in products {
            body.push_str(&format!(
                "<tr><td>{id}</td><td>{name}</td><td>{category}</td>\
                 <td>R$ {price}</td><td>{quantity}</td>\
                 <td><a href=\"/produto/{id}\">detalhes</a></td></tr>\n",
                id = product.id,
                name = escape(&product.name),
                category = escape(&product.category),
                price = price(product.unit_price),
                quantity = product.quantity,
            ));
        }
        body.push_str("</table>\n");
    }
    body.push_str("<p><a href=\"/produto/novo\">Novo produto</a></p>");
    layout("Produtos", flash, true, &body)
}

/// Creation and edit form; `product` is `Some` when editing.
pub fn product_form_page(title: &str, product: Option<&Product>, flash: Option<&Flash>) -> String {
    let action = match product {
        Some(product) => format!("/produto/{}/editar", product.id),
        None => "/produto/novo".to_string(),
    };
    let name = product.map(|p| escape(&p.name)).unwrap_or_default();
    let category = product.map(|p| escape(&p.category)).unwrap_or_default();
    let unit_price = product.map(|p| price(p.unit_price)).unwrap_or_default();

    let mut body = format!(
        "<h2>{title}</h2>
<form method=\"post\" action=\"{action}\">
  <label>Nome <input type=\"text\" name=\"nome\" value=\"{name}\"></label>
  <label>Categoria <input type=\"text\" name=\"categoria\" value=\"{category}\"></label>
  <label>Preço unitário <input type=\"text\" name=\"preco_unitario\" value=\"{unit_price}\"></label>\n",
        title = escape(title),
    );
    if product.is_none() {
        body.push_str(
            "  <label>Quantidade inicial \
             <input type=\"text\" name=\"quantidade_inicial\" value=\"0\"></label>\n",
        );
    }
    body.push_str("  <p><button type=\"submit\">Salvar</button></p>\n</form>");
    layout(title, flash, true, &body)
}

/// Detail page with the stock-movement and removal forms.
pub fn product_detail_page(product: &Product, flash: Option<&Flash>) -> String {
    let body = format!(
        "<h2>{name}</h2>
<dl>
  <dt>ID</dt><dd>{id}</dd>
  <dt>Categoria</dt><dd>{category}</dd>
  <dt>Preço unitário</dt><dd>R$ {unit_price}</dd>
  <dt>Quantidade em estoque</dt><dd>{quantity}</dd>
</dl>
<h3>Movimentar estoque</h3>
<form method=\"post\" action=\"/produto/{id}/estoque\">
  <label>Tipo
    <select name=\"tipo\">
      <option value=\"entrada\">entrada</option>
      <option value=\"saida\">saida</option>
    </select>
  </label>
  <label>Quantidade <input type=\"text\" name=\"quantidade\" value=\"1\"></label>
  <p><button type=\"submit\">Registrar</button></p>
</form>
<p>
  <a href=\"/produto/{id}/editar\">Editar</a>
</p>
<form class=\"inline\" method=\"post\" action=\"/produto/{id}/remover\">
  <button type=\"submit\">Remover produto</button>
</form>",
        id = product.id,
        name = escape(&product.name),
        category = escape(&product.category),
        unit_price = price(product.unit_price),
        quantity = product.quantity,
    );
    layout(&product.name, flash, true, &body)
}

fn layout(title: &str, flash: Option<&Flash>, nav: bool, body: &str) -> String {
    let nav = if nav {
        "<nav><a href=\"/\">Produtos</a><a href=\"/produto/novo\">Novo</a>\
         <a href=\"/logout\">Sair</a></nav>"
    } else {
        ""
    };
    let flash = flash
        .map(|flash| {
            format!(
                "<div class=\"flash {}\">{}</div>\n",
                flash.level.css_class(),
                escape(&flash.message)
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>
<html lang=\"pt-BR\">
<head>
<meta charset=\"utf-8\">
<title>{title} — Estoque</title>
<style>{STYLE}</style>
</head>
<body>
<header><h1>Estoque</h1>{nav}</header>
{flash}{body}
</body>
</html>",
        title = escape(title),
    )
}

fn price(value: f64) -> String {
    format!("{value:.2}")
}

/// Minimal HTML escaping for text interpolated into the pages.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use estoque_core::ProductId;

    fn product() -> Product {
        Product {
            id: ProductId::from_raw(1),
            name: "SSD 1TB".to_string(),
            category: "Armazenamento".to_string(),
            unit_price: 450.0,
            quantity: 5,
        }
    }

    #[test]
    fn interpolated_data_is_escaped() {
        let mut product = product();
        product.name = "<script>alert('x')</script>".to_string();

        let page = product_detail_page(&product, None);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn index_lists_each_product_with_a_detail_link() {
        let page = index_page(&[product()], None);
        assert!(page.contains("SSD 1TB"));
        assert!(page.contains("href=\"/produto/1\""));
    }

    #[test]
    fn index_without_products_says_so() {
        let page = index_page(&[], None);
        assert!(page.contains("Nenhum produto cadastrado."));
    }

    #[test]
    fn flash_is_rendered_with_its_level() {
        let flash = Flash::success("Login realizado com sucesso!");
        let page = login_page(Some(&flash));
        assert!(page.contains("flash success"));
        assert!(page.contains("Login realizado com sucesso!"));
    }

    #[test]
    fn edit_form_prefills_the_current_values() {
        let page = product_form_page("Editar Produto", Some(&product()), None);
        assert!(page.contains("value=\"SSD 1TB\""));
        assert!(page.contains("action=\"/produto/1/editar\""));
        assert!(!page.contains("quantidade_inicial"));
    }

    #[test]
    fn creation_form_asks_for_the_initial_quantity() {
        let page = product_form_page("Novo Produto", None, None);
        assert!(page.contains("quantidade_inicial"));
        assert!(page.contains("action=\"/produto/novo\""));
    }
}
