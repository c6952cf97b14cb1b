// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_product_grid(cards: usize) -> String {
    let mut html = String::from("<section class=\"product-grid\">\n<h2>Featured products</h2>\n");
    for i in 0..cards {
        html.push_str(&format!(
            "<div class=\"grid-item card\">\
             <img src=\"/img/{i}.jpg\" alt=\"Product {i}\">\
             <h3>Product {i}</h3>\
             <p>Hand-picked item number {i} from this season's catalogue.</p>\
             <a class=\"btn btn-primary\" href=\"/products/{i}\">View</a>\
             </div>\n"
        ));
    }
    html.push_str("</section>");
    html
}

#[allow(dead_code)]
pub fn generate_theme_css(rules: usize) -> String {
    (0..rules)
        .map(|i| {
            format!(
                "/* rule {i} */\n.pd-item-{i} > a + span ,\n.pd-item-{i} ~ p {{\n  margin : {i}px  auto ;\n  color: var(--pd-primary-color);\n}}\n"
            )
        })
        .collect()
}
