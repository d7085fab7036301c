pub mod livros;
