fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Rerun if the wire contract changes
    println!("cargo:rerun-if-changed=proto/document_parser.proto");

    // Use the bundled protoc unless the environment already provides one
    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path()?;
        std::env::set_var("PROTOC", protoc);
    }

    // Server for the binary, client for the integration tests
    tonic_build::compile_protos("proto/document_parser.proto")?;

    Ok(())
}
