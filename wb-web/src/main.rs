fn main() {
    dioxus::launch(wb_web::App);
}
