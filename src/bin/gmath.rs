use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use clap::{Args, Parser, Subcommand, ValueEnum};
    use gmath::{Decomposition, Fixed, Matrix4x4, Scalar};

    #[derive(Debug, Parser)]
    #[command(about = "Inspect 4x4 matrices from the command line", long_about = None)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Print the inverse of a matrix
        Invert(MatrixArgs),
        /// Split a matrix into scale, rotation and translation
        Decompose(MatrixArgs),
        /// Print the determinant of a matrix
        Determinant(MatrixArgs),
    }

    #[derive(Debug, Args)]
    struct MatrixArgs {
        /// The 16 matrix elements in row-major order (m11 m12 ... m44)
        #[arg(num_args = 16, required = true, allow_negative_numbers = true)]
        elements: Vec<f64>,

        /// Scalar precision to compute in
        #[arg(short, long, value_enum, default_value_t = Precision::F32)]
        precision: Precision,
    }

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum Precision {
        F32,
        F64,
        Fixed,
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        let (operation, args) = match cli.command {
            Command::Invert(args) => (Operation::Invert, args),
            Command::Decompose(args) => (Operation::Decompose, args),
            Command::Determinant(args) => (Operation::Determinant, args),
        };

        match args.precision {
            Precision::F32 => operation.run::<f32>(&args.elements),
            Precision::F64 => operation.run::<f64>(&args.elements),
            Precision::Fixed => operation.run::<Fixed>(&args.elements),
        }
    }

    #[derive(Clone, Copy, Debug)]
    enum Operation {
        Invert,
        Decompose,
        Determinant,
    }

    impl Operation {
        fn run<T: Scalar>(self, elements: &[f64]) -> Result<()> {
            let matrix = parse_matrix::<T>(elements)?;
            match self {
                Self::Invert => {
                    let Some(inverse) = matrix.invert() else {
                        anyhow::bail!("Matrix is singular: {matrix}");
                    };
                    println!("{inverse}");
                }
                Self::Decompose => {
                    let Some(Decomposition {
                        scale,
                        rotation,
                        translation,
                    }) = matrix.decompose()
                    else {
                        anyhow::bail!(
                            "Matrix is not a composition of scale, rotation and translation: {matrix}"
                        );
                    };
                    println!("scale: {scale}");
                    println!("rotation: {rotation}");
                    println!("translation: {translation}");
                }
                Self::Determinant => {
                    println!("{}", matrix.determinant());
                }
            }
            Ok(())
        }
    }

    fn parse_matrix<T: Scalar>(elements: &[f64]) -> Result<Matrix4x4<T>> {
        let elements: [f64; 16] = elements.try_into().map_err(|_| {
            anyhow::anyhow!("Expected 16 matrix elements, got {}", elements.len())
        })?;
        Ok(Matrix4x4::from(elements.map(T::from_f64_lossy)))
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
