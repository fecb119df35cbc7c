use structopt::StructOpt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> debugpoints_util::Fallible<()> {
    debugpoints::Options::from_args().main().await
}
