fn main() {
    let input = std::env::args().nth(1).expect("usage: parse <file.svg>");
    let data = std::fs::read(&input).unwrap();
    let doc = svg_prim::Document::from_data(&data).unwrap();

    println!("{} x {}", doc.width, doc.height);
    println!("{:#?}", doc.root);
}
