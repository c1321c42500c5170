/// Display version information
pub fn execute() {
    println!("daoboard {}", env!("CARGO_PKG_VERSION"));
    println!("Dashboard CLI for DAO proposals and votes");
}
