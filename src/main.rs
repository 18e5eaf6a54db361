use triangle_bootstrap::AppConfig;

fn main() {
    triangle_bootstrap::run(AppConfig::from_env());
}
