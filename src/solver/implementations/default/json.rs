use crate::{
    algebra::*,
    solver::{DefaultSettings, DefaultSolver, SolverError, SupportedConeT},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// A struct very similar to the problem data, but containing only
// the data types provided by the user (i.e. no internal types).

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonProblemData<T: FloatT> {
    pub P: CscMatrix<T>,
    pub c: Vec<T>,
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
    pub cones: Vec<SupportedConeT<T>>,
    pub settings: DefaultSettings<T>,
}

// Dump the user data to a JSON file.  Called at solver setup, before
// any equilibration is applied, so the file holds data exactly as
// provided.

#[allow(clippy::too_many_arguments)]
pub(crate) fn write_data_file<T>(
    filename: &str,
    P: &CscMatrix<T>,
    c: &[T],
    A: &CscMatrix<T>,
    b: &[T],
    cones: &[SupportedConeT<T>],
    settings: &DefaultSettings<T>,
) -> Result<(), io::Error>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    let json_data = JsonProblemData {
        P: P.clone(),
        c: c.to_vec(),
        A: A.clone(),
        b: b.to_vec(),
        cones: cones.to_vec(),
        settings: settings.clone(),
    };

    let json = serde_json::to_string(&json_data)?;
    File::create(filename)?.write_all(json.as_bytes())?;

    Ok(())
}

impl<T> DefaultSolver<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Construct a solver from a JSON problem dump produced via the
    /// `write_data_filename` setting.
    pub fn read_from_file(file: &mut File) -> Result<Self, SolverError> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonProblemData<T> =
            serde_json::from_str(&buffer).map_err(io::Error::from)?;

        // never re-dump on load
        let mut settings = json_data.settings;
        settings.write_data_filename = None;

        Self::new(
            &json_data.P,
            &json_data.c,
            &json_data.A,
            &json_data.b,
            &json_data.cones,
            settings,
        )
    }
}

#[test]
fn test_json_io() {
    let P = CscMatrix {
        m: 1,
        n: 1,
        colptr: vec![0, 1],
        rowval: vec![0],
        nzval: vec![2.0],
    };
    let c = [1.0];
    let A = CscMatrix {
        m: 1,
        n: 1,
        colptr: vec![0, 1],
        rowval: vec![0],
        nzval: vec![-1.0],
    };
    let b = [-2.0];
    let cones = vec![crate::solver::SupportedConeT::NonnegativeConeT(1)];

    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let settings = crate::solver::DefaultSettingsBuilder::default()
        .write_data_filename(Some(path.clone()))
        .build()
        .unwrap();

    // building the solver dumps the problem to the file
    let solver = crate::solver::DefaultSolver::<f64>::new(&P, &c, &A, &b, &cones, settings).unwrap();

    // read the problem back and compare
    let mut file = File::open(&path).unwrap();
    let solver2 = crate::solver::DefaultSolver::<f64>::read_from_file(&mut file).unwrap();

    assert_eq!(solver.data.b_orig, solver2.data.b_orig);
    assert_eq!(solver.data.c_orig, solver2.data.c_orig);
    assert_eq!(solver.data.A.nzval, solver2.data.A.nzval);
    assert!(solver2.settings.write_data_filename.is_none());
}
